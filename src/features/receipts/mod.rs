// 領収書機能モジュール

pub mod models;
pub mod validator;

// 公開インターフェース
pub use models::{content_type_for, extension_of, FileSelection, ReceiptFile, ValidationResult};
pub use validator::{FileUploadValidator, ALLOWED_EXTENSIONS, REJECTED_FILE_MESSAGE};
