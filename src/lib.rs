//! Billed 経費精算クライアントのコア
//!
//! 請求書一覧の取得・表示準備、領収書ファイルの検証、新規請求書の送信を提供する。
//! 画面描画・画面遷移・通知は`shared::context`のトレイトを通じて外部に委ねる。

pub mod features;
pub mod shared;

use log::{info, warn};
use shared::config::{
    initialize_logging_system, load_environment_variables, ApiConfig, BillsConfig,
    EnvironmentConfig,
};

/// 起動時に読み込んだ設定一式
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: EnvironmentConfig,
    pub api: ApiConfig,
    pub bills: BillsConfig,
}

/// 環境変数とログを初期化し、設定を読み込む
///
/// API設定が不正な場合、本番環境ではエラーを返し、開発環境では警告のみ出して続行する。
pub fn initialize() -> shared::AppResult<AppConfig> {
    load_environment_variables();
    initialize_logging_system();

    info!("アプリケーション初期化を開始します...");

    let environment = EnvironmentConfig::from_env();
    let api = ApiConfig::from_env();
    let bills = BillsConfig::from_env();

    if let Err(e) = api.validate() {
        if environment.is_production() {
            return Err(shared::AppError::configuration(format!(
                "本番環境でのAPI設定エラー: {e}"
            )));
        }
        warn!("開発環境のため、API設定エラーを無視して続行します: {e}");
    }

    info!(
        "設定を読み込みました: environment={}, api={}, locale={}",
        environment.environment, api.base_url, bills.date_locale
    );

    Ok(AppConfig {
        environment,
        api,
        bills,
    })
}
