// 新規請求書機能モジュール

pub mod submission;

// 公開インターフェース
pub use submission::{NewBillForm, NewBillSubmission, SubmissionState};
