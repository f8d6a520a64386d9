use crate::features::receipts::models::{extension_of, FileSelection, ReceiptFile, ValidationResult};
use crate::shared::config::BillsConfig;
use crate::shared::context::Notifier;
use log::{info, warn};

/// 受け付ける領収書の拡張子
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 拒否時にユーザーへ表示するメッセージ
pub const REJECTED_FILE_MESSAGE: &str =
    "Ce type de fichier n'est pas accepté. Formats acceptés : jpg, jpeg, png.";

/// 領収書ファイルの形式チェック（クライアント側の事前チェック）
#[derive(Debug, Clone)]
pub struct FileUploadValidator {
    max_size_bytes: u64,
}

impl FileUploadValidator {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// 画面設定の上限サイズで作成
    pub fn from_config(config: &BillsConfig) -> Self {
        Self::new(config.max_receipt_size_bytes)
    }

    /// ファイル名の拡張子で受け付け可否を判定する（大文字小文字は区別しない）
    pub fn validate(&self, file_name: &str) -> ValidationResult {
        match extension_of(file_name) {
            Some(extension) if ALLOWED_EXTENSIONS.contains(&extension.as_str()) => {
                ValidationResult::Accepted {
                    file_name: file_name.to_string(),
                    extension,
                }
            }
            Some(extension) => ValidationResult::Rejected {
                file_name: file_name.to_string(),
                reason: format!("拡張子 {extension} は受け付けていません"),
            },
            None => ValidationResult::Rejected {
                file_name: file_name.to_string(),
                reason: "拡張子がありません".to_string(),
            },
        }
    }

    /// ファイル名とサイズを検証する
    pub fn validate_file(&self, file: &ReceiptFile) -> ValidationResult {
        let result = self.validate(&file.file_name);
        if result.is_accepted() && file.size() > self.max_size_bytes {
            return ValidationResult::Rejected {
                file_name: file.file_name.clone(),
                reason: format!(
                    "ファイルサイズが制限を超えています: {} bytes (最大: {} bytes)",
                    file.size(),
                    self.max_size_bytes
                ),
            };
        }
        result
    }

    /// ファイル入力欄の変更を処理する
    ///
    /// 拒否した場合はアラートを表示して入力欄を空にし、`None`を返す。
    /// 受け付けた場合は入力欄からファイルを取り出して返す。
    pub fn handle_change_file(
        &self,
        selection: &mut FileSelection,
        notifier: &dyn Notifier,
    ) -> Option<ReceiptFile> {
        let result = match selection.file() {
            Some(file) => self.validate_file(file),
            None => return None,
        };

        match result {
            ValidationResult::Accepted { file_name, .. } => {
                info!("領収書ファイルを受け付けました: {file_name}");
                selection.take()
            }
            ValidationResult::Rejected { file_name, reason } => {
                warn!("領収書ファイルを拒否しました: {file_name}, reason={reason}");
                notifier.alert(REJECTED_FILE_MESSAGE);
                selection.clear();
                None
            }
        }
    }
}

impl Default for FileUploadValidator {
    fn default() -> Self {
        Self::new(10 * 1024 * 1024)
    }
}
