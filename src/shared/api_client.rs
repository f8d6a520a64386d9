//! 汎用APIクライアント
//!
//! 請求書ストア（APIサーバー）との通信を行う。
//! ステータス付きの失敗はそのまま`AppError::Api`として返し、
//! 接続失敗のみ設定回数だけリトライする。

use crate::shared::config::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(config: ApiConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let mut request = self.client.get(self.url(endpoint));
        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let mut attempts = 0;
        loop {
            let cloned = request.try_clone().ok_or_else(|| {
                AppError::ExternalService("リクエストのクローンに失敗しました".to_string())
            })?;

            match self.send(cloned, "GET", endpoint).await {
                Err(SendError::Connection(e)) if attempts < self.config.max_retries => {
                    attempts += 1;
                    self.wait_before_retry(attempts, &e).await;
                }
                result => return result.map_err(AppError::from),
            }
        }
    }

    /// マルチパートPOSTリクエストを送信
    ///
    /// マルチパートフォームはクローンできないため、リトライごとに`build_form`で再作成する。
    pub async fn post_multipart<T, F>(
        &self,
        endpoint: &str,
        build_form: F,
        auth_token: Option<&str>,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
        F: Fn() -> AppResult<multipart::Form>,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");

        let mut attempts = 0;
        loop {
            let mut request = self.client.post(self.url(endpoint)).multipart(build_form()?);
            if let Some(token) = auth_token {
                request = request.header("Authorization", format!("Bearer {token}"));
            }

            match self.send(request, "POST", endpoint).await {
                Err(SendError::Connection(e)) if attempts < self.config.max_retries => {
                    attempts += 1;
                    self.wait_before_retry(attempts, &e).await;
                }
                result => return result.map_err(AppError::from),
            }
        }
    }

    async fn wait_before_retry(&self, attempts: u32, error: &reqwest::Error) {
        let delay = Duration::from_secs(2_u64.pow(attempts));
        warn!(
            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}, error={error}",
            self.config.max_retries
        );
        tokio::time::sleep(delay).await;
    }

    /// リクエストを1回送信し、レスポンスを解析する
    async fn send<T>(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, SendError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(SendError::Connection)?;

        if !response.status().is_success() {
            return Err(SendError::App(self.handle_error_response(response).await));
        }

        let body = response.text().await.map_err(SendError::Connection)?;
        let result: T = serde_json::from_str(&body).map_err(|e| {
            warn!("レスポンス解析エラー: endpoint={endpoint}, error={e}");
            SendError::App(AppError::Json(e))
        })?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// エラーレスポンスをステータス付きのエラーに変換する
    async fn handle_error_response(&self, response: Response) -> AppError {
        let status_code = response.status().as_u16();

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
            debug!(
                "APIサーバーから構造化エラーレスポンスを受信: code={}, message={}",
                error_response.error.code, error_response.error.message
            );
            return AppError::api(
                status_code,
                error_response.error.code,
                error_response.error.message,
            );
        }

        let (error_code, user_message) = status_code_message(status_code);
        warn!("APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}");

        AppError::api(status_code, error_code, user_message)
    }
}

/// HTTPステータスからエラーコードとメッセージを決める
fn status_code_message(status_code: u16) -> (&'static str, &'static str) {
    match status_code {
        400 => ("BAD_REQUEST", "リクエストの形式が正しくありません"),
        401 => (
            "UNAUTHORIZED",
            "認証に失敗しました。再度ログインしてください",
        ),
        403 => ("FORBIDDEN", "この操作を実行する権限がありません"),
        404 => ("NOT_FOUND", "指定されたリソースが見つかりません"),
        413 => ("PAYLOAD_TOO_LARGE", "データサイズが制限を超えています"),
        415 => (
            "UNSUPPORTED_MEDIA_TYPE",
            "サポートされていないデータ形式です",
        ),
        500 => ("INTERNAL_SERVER_ERROR", "サーバー内部エラーが発生しました"),
        502 => ("BAD_GATEWAY", "APIサーバーとの通信でエラーが発生しました"),
        503 => ("SERVICE_UNAVAILABLE", "APIサーバーが一時的に利用できません"),
        504 => (
            "GATEWAY_TIMEOUT",
            "APIサーバーからの応答がタイムアウトしました",
        ),
        _ => ("UNKNOWN_ERROR", "不明なエラーが発生しました"),
    }
}

/// 1回の送信結果の失敗
enum SendError {
    /// 接続レベルの失敗（リトライ対象）
    Connection(reqwest::Error),
    /// それ以外の失敗
    App(AppError),
}

impl From<SendError> for AppError {
    fn from(error: SendError) -> Self {
        match error {
            SendError::Connection(e) => {
                AppError::external_service(
                    "APIサーバー".to_string(),
                    format!("接続に失敗しました: {e}"),
                )
            }
            SendError::App(e) => e,
        }
    }
}
