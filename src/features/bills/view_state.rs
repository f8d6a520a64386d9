use crate::features::bills::models::Bill;
use crate::shared::errors::ErrorKind;
use serde::Serialize;

/// 表示用に整形された請求書の行
///
/// 描画パスごとに作られ、保存も変更もされない。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    #[serde(flatten)]
    pub bill: Bill,
    /// 表示用の日付（整形に失敗した場合は保存値そのまま）
    pub formatted_date: String,
    pub status_label: &'static str,
}

/// 一覧取得の結果
#[derive(Debug, Clone, PartialEq)]
pub enum BillsOutcome {
    Ready(Vec<DisplayRow>),
    Failed(ErrorKind),
}

impl BillsOutcome {
    pub fn rows(&self) -> Option<&[DisplayRow]> {
        match self {
            BillsOutcome::Ready(rows) => Some(rows),
            BillsOutcome::Failed(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            BillsOutcome::Ready(_) => None,
            BillsOutcome::Failed(kind) => Some(*kind),
        }
    }
}

/// 一覧画面の状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BillsViewState {
    /// まだ取得していない
    #[default]
    Idle,
    Loading,
    Ready(Vec<DisplayRow>),
    Failed(ErrorKind),
}

impl From<BillsOutcome> for BillsViewState {
    fn from(outcome: BillsOutcome) -> Self {
        match outcome {
            BillsOutcome::Ready(rows) => BillsViewState::Ready(rows),
            BillsOutcome::Failed(kind) => BillsViewState::Failed(kind),
        }
    }
}

impl BillsViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, BillsViewState::Loading)
    }

    /// テンプレートに渡すデータ
    pub fn to_view_model(&self) -> BillsViewModel<'_> {
        match self {
            BillsViewState::Idle => BillsViewModel {
                rows: &[],
                loading: false,
                error: None,
            },
            BillsViewState::Loading => BillsViewModel {
                rows: &[],
                loading: true,
                error: None,
            },
            BillsViewState::Ready(rows) => BillsViewModel {
                rows,
                loading: false,
                error: None,
            },
            BillsViewState::Failed(kind) => BillsViewModel {
                rows: &[],
                loading: false,
                error: Some(kind.message()),
            },
        }
    }
}

/// 描画コラボレーターに渡す `{rows, loading, error}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillsViewModel<'a> {
    pub rows: &'a [DisplayRow],
    pub loading: bool,
    pub error: Option<&'static str>,
}

/// 領収書モーダルに表示する情報
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPreview {
    pub file_url: String,
    pub file_name: String,
    pub image_width: u32,
}
