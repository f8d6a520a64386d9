/// 機能別モジュール
///
/// 各機能モジュールは、その機能に関連するコード（モデル、ストア、画面ロジック）
/// を含む自己完結型のユニットです。
// 機能モジュールの宣言
pub mod bills;
pub mod new_bill;
pub mod receipts;
