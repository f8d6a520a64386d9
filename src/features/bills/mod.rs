/// 請求書機能モジュール
///
/// このモジュールは請求書一覧に関連する機能を提供します：
/// - 請求書データモデルとワイヤー形式からの検証
/// - 請求書ストアの抽象化とHTTP実装
/// - 一覧の取得・日付整形・並べ替え
/// - 画面状態（読み込み中・エラー・表示）
// サブモジュールの宣言
pub mod http_store;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod view_state;

// 公開インターフェース

// モデル
pub use models::{Bill, BillRecord, BillStatus, BillType, NewBill, Receipt, DEFAULT_PCT};

// ストア
pub use http_store::{parse_bill_records, HttpBillStore};
pub use store::BillStore;

// 一覧パイプライン
pub use pipeline::BillListPipeline;
pub use view_state::{BillsOutcome, BillsViewModel, BillsViewState, DisplayRow, ReceiptPreview};
