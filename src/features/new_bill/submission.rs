//! 新規請求書の送信
//!
//! フォーム入力から請求書を組み立て、領収書ファイルと一緒にストアへ1回だけ送信する。

use crate::features::bills::models::{Bill, BillStatus, BillType, NewBill, DEFAULT_PCT};
use crate::features::bills::store::BillStore;
use crate::features::receipts::models::ReceiptFile;
use crate::shared::context::{Route, Router, Session};
use crate::shared::errors::{AppError, AppResult, ErrorKind};
use crate::shared::utils::{
    non_empty, normalize_string, parse_optional_number, validate_amount, validate_date,
    validate_required_field,
};
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::watch;

/// 新規請求書フォームの入力値（未解析の文字列）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillForm {
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: String,
    #[serde(default)]
    pub commentary: String,
}

/// 送信の状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted { bill_id: String },
    Failed(ErrorKind),
}

impl NewBillForm {
    /// フォームを検証して作成用の請求書に変換する
    fn into_new_bill(self, session: &Session, receipt: &ReceiptFile) -> AppResult<NewBill> {
        let bill_type: BillType = self.bill_type.parse()?;

        validate_required_field(&self.amount, "金額")?;
        let amount = parse_optional_number(&self.amount, "金額")?
            .ok_or_else(|| AppError::validation("金額は必須項目です"))?;
        validate_amount(amount)?;

        let date = normalize_string(&self.date);
        validate_date(&date)?;

        let vat = parse_optional_number(&self.vat, "TVA")?;
        let pct = parse_optional_number(&self.pct, "%")?.unwrap_or(DEFAULT_PCT);

        Ok(NewBill {
            email: session.email.clone(),
            bill_type,
            name: normalize_string(&self.name),
            amount,
            date,
            vat,
            pct,
            commentary: non_empty(&self.commentary),
            file_name: receipt.file_name.clone(),
            status: BillStatus::Pending,
        })
    }
}

/// 新規請求書の送信処理
pub struct NewBillSubmission {
    store: Arc<dyn BillStore>,
    router: Arc<dyn Router>,
    state: watch::Sender<SubmissionState>,
}

impl NewBillSubmission {
    pub fn new(store: Arc<dyn BillStore>, router: Arc<dyn Router>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            store,
            router,
            state,
        }
    }

    /// 現在の送信状態
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// 送信状態の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// 請求書を送信する
    ///
    /// # 引数
    /// * `session` - ログイン中のユーザー（請求書の所有者になる）
    /// * `form` - フォームの入力値
    /// * `receipt` - 検証済みの領収書ファイル
    ///
    /// # 戻り値
    /// ストアが作成した請求書。フォームの入力エラーは状態を変えずに返す。
    pub async fn submit(
        &self,
        session: &Session,
        form: NewBillForm,
        receipt: ReceiptFile,
    ) -> AppResult<Bill> {
        if let SubmissionState::Submitted { bill_id } = self.state() {
            return Err(AppError::validation(format!(
                "この請求書はすでに送信済みです: {bill_id}"
            )));
        }

        let new_bill = form.into_new_bill(session, &receipt)?;

        info!(
            "請求書を送信します: type={}, amount={}, file={}",
            new_bill.bill_type, new_bill.amount, new_bill.file_name
        );
        self.state.send_replace(SubmissionState::Submitting);

        match self.store.create(new_bill, receipt).await {
            Ok(created) => {
                info!("請求書の送信に成功しました: id={}", created.id);
                self.state.send_replace(SubmissionState::Submitted {
                    bill_id: created.id.clone(),
                });
                self.router.navigate(Route::Bills);
                Ok(created)
            }
            Err(e) => {
                let kind = ErrorKind::classify(&e);
                error!(
                    "請求書の送信に失敗しました: kind={kind:?}, severity={:?}, error={}",
                    e.severity(),
                    e.details()
                );
                self.state.send_replace(SubmissionState::Failed(kind));
                Err(e)
            }
        }
    }
}
