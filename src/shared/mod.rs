/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// 共有ユーティリティ関数
pub mod utils;

/// セッション・画面遷移・通知
pub mod context;

/// APIサーバーとのHTTP通信
pub mod api_client;

// 便利な再エクスポート
pub use api_client::ApiClient;
pub use config::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    BillsConfig, Environment, EnvironmentConfig,
};
pub use context::{Notifier, Route, Router, Session, UserType};
pub use errors::{AppError, AppResult, ErrorKind, ErrorSeverity};
