//! 請求書一覧の取得・表示準備
//!
//! ストアから一覧を1回だけ取得し、日付を整形して新しい順に並べ、
//! 結果を `{loading, error, ready}` のいずれかの状態として公開する。

use crate::features::bills::models::Bill;
use crate::features::bills::store::BillStore;
use crate::features::bills::view_state::{
    BillsOutcome, BillsViewState, DisplayRow, ReceiptPreview,
};
use crate::shared::config::BillsConfig;
use crate::shared::context::{Route, Router};
use crate::shared::errors::ErrorKind;
use crate::shared::utils::date_format::DateFormatter;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// 請求書一覧パイプライン
pub struct BillListPipeline {
    store: Arc<dyn BillStore>,
    router: Arc<dyn Router>,
    formatter: DateFormatter,
    config: BillsConfig,
    state: watch::Sender<BillsViewState>,
}

impl BillListPipeline {
    pub fn new(store: Arc<dyn BillStore>, router: Arc<dyn Router>, config: BillsConfig) -> Self {
        let (state, _) = watch::channel(BillsViewState::Idle);
        Self {
            store,
            router,
            formatter: DateFormatter::new(config.date_locale),
            config,
            state,
        }
    }

    /// 現在の画面状態
    pub fn state(&self) -> BillsViewState {
        self.state.borrow().clone()
    }

    /// 画面状態の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<BillsViewState> {
        self.state.subscribe()
    }

    /// 一覧を取得して表示用に整える
    ///
    /// リトライはしない。複数回の呼び出しは互いに独立しており、
    /// 最後に完了した呼び出しの結果が画面状態になる。
    pub async fn fetch_and_prepare(&self) -> BillsOutcome {
        info!("請求書一覧の取得を開始します");
        self.state.send_replace(BillsViewState::Loading);

        let outcome = match self.store.list().await {
            Ok(bills) => {
                let rows = self.prepare_rows(bills);
                info!("請求書一覧の取得成功: count={}", rows.len());
                BillsOutcome::Ready(rows)
            }
            Err(e) => {
                let kind = ErrorKind::classify(&e);
                error!(
                    "請求書一覧の取得に失敗しました: kind={kind:?}, severity={:?}, error={}",
                    e.severity(),
                    e.details()
                );
                BillsOutcome::Failed(kind)
            }
        };

        self.state.send_replace(outcome.clone().into());
        outcome
    }

    /// 日付を整形し、保存値の新しい順に並べる
    ///
    /// 同じ日付の請求書はストアの順序を保つ（安定ソート）。
    pub fn prepare_rows(&self, bills: Vec<Bill>) -> Vec<DisplayRow> {
        let mut rows: Vec<DisplayRow> = bills
            .into_iter()
            .map(|bill| {
                let formatted_date = match self.formatter.format(&bill.date) {
                    Ok(formatted) => formatted,
                    Err(e) => {
                        warn!("{e}（請求書 {} は保存値のまま表示します）", bill.id);
                        bill.date.clone()
                    }
                };
                let status_label = bill.status.label();
                DisplayRow {
                    bill,
                    formatted_date,
                    status_label,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            self.formatter
                .sort_key(&b.bill.date)
                .cmp(self.formatter.sort_key(&a.bill.date))
        });

        debug!("請求書の行を整形しました: {} 件", rows.len());
        rows
    }

    /// 「新しい請求書」ボタン
    pub fn handle_click_new_bill(&self) {
        debug!("新規請求書画面へ遷移します");
        self.router.navigate(Route::NewBill);
    }

    /// 目のアイコン：領収書のプレビュー情報を返す
    ///
    /// 領収書がない請求書の場合は`None`。
    pub fn handle_click_icon_eye(&self, row: &DisplayRow) -> Option<ReceiptPreview> {
        let receipt = row.bill.receipt.as_ref()?;
        Some(ReceiptPreview {
            file_url: receipt.file_url.clone(),
            file_name: receipt.file_name.clone(),
            image_width: self.config.modal_image_width(),
        })
    }
}
