use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// APIサーバーがステータス付きで拒否したエラー
    #[error("APIサーバーエラー: status={status}, code={code}, message={message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// 外部サービス連携でのエラー（ステータスなし）
    #[error("外部サービスエラー: {0}")]
    ExternalService(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl AppError {
    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::Api { status, .. } if *status >= 500 => ErrorSeverity::High,
            AppError::Api { .. } => ErrorSeverity::Medium,
            AppError::ExternalService(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// APIサーバーから返されたHTTPステータス（存在する場合）
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// ステータス付きAPIエラーを作成するヘルパー関数
    pub fn api<C: Into<String>, M: Into<String>>(status: u16, code: C, message: M) -> Self {
        AppError::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// 外部サービスエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `service` - サービス名
    /// * `message` - エラーメッセージ
    pub fn external_service<S: Into<String>>(service: S, message: S) -> Self {
        AppError::ExternalService(format!("{}: {}", service.into(), message.into()))
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// ストア呼び出しの失敗を画面向けに分類したもの
///
/// 呼び出し側が観測するのは生のエラーではなくこの分類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorKind {
    /// ストアがリソースなし（404）を報告した
    NotFound,
    /// ストアが内部エラー（5xx、またはステータス不明の接続失敗）を報告した
    ServerError,
    /// それ以外
    UnknownError,
}

impl ErrorKind {
    /// エラーを分類する
    pub fn classify(error: &AppError) -> Self {
        match error.status() {
            Some(404) => ErrorKind::NotFound,
            Some(status) if (500..=599).contains(&status) => ErrorKind::ServerError,
            Some(_) => ErrorKind::UnknownError,
            // ステータスのない接続失敗はサーバー側の失敗として扱う
            None if matches!(error, AppError::ExternalService(_)) => ErrorKind::ServerError,
            None => ErrorKind::UnknownError,
        }
    }

    /// 画面に表示するメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Erreur 404",
            ErrorKind::ServerError => "Erreur 500",
            ErrorKind::UnknownError => "Erreur",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        // 各エラータイプの重要度をテスト
        assert_eq!(
            AppError::validation("テスト").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            AppError::not_found("請求書").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            AppError::external_service("API", "接続失敗").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            AppError::api(500, "INTERNAL_SERVER_ERROR", "boom").severity(),
            ErrorSeverity::High
        );
        assert_eq!(
            AppError::api(404, "NOT_FOUND", "missing").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            AppError::configuration("設定ファイル不正").severity(),
            ErrorSeverity::High
        );
    }

    #[test]
    fn test_not_found_message() {
        let error = AppError::not_found("請求書");
        assert!(error.details().contains("請求書が見つかりません"));
    }

    #[test]
    fn test_status() {
        assert_eq!(AppError::api(404, "NOT_FOUND", "x").status(), Some(404));
        assert_eq!(AppError::external_service("API", "down").status(), None);
        assert_eq!(AppError::validation("x").status(), None);
    }

    #[test]
    fn test_error_details() {
        let error = AppError::api(404, "NOT_FOUND", "bills missing");
        let details = error.details();
        assert!(details.contains("404"));
        assert!(details.contains("bills missing"));
    }

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(
            ErrorKind::classify(&AppError::api(404, "NOT_FOUND", "x")),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::classify(&AppError::api(500, "INTERNAL_SERVER_ERROR", "x")),
            ErrorKind::ServerError
        );
        assert_eq!(
            ErrorKind::classify(&AppError::api(503, "SERVICE_UNAVAILABLE", "x")),
            ErrorKind::ServerError
        );
        assert_eq!(
            ErrorKind::classify(&AppError::ExternalService("接続失敗".to_string())),
            ErrorKind::ServerError
        );
        assert_eq!(
            ErrorKind::classify(&AppError::api(401, "UNAUTHORIZED", "x")),
            ErrorKind::UnknownError
        );
        assert_eq!(
            ErrorKind::classify(&AppError::validation("x")),
            ErrorKind::UnknownError
        );
    }

    #[test]
    fn test_error_kind_message() {
        assert!(ErrorKind::NotFound.message().contains("404"));
        assert!(ErrorKind::ServerError.to_string().contains("500"));
        assert_eq!(ErrorKind::UnknownError.message(), "Erreur");
    }
}
