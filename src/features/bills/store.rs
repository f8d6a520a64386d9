use crate::features::bills::models::{Bill, NewBill};
use crate::features::receipts::models::ReceiptFile;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// 請求書ストア（リモートのドキュメントコレクション）
///
/// 失敗はHTTPステータス付きの`AppError::Api`として返る。
#[async_trait]
pub trait BillStore: Send + Sync {
    /// 請求書の一覧を取得する
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 領収書ファイルと一緒に請求書を作成する
    ///
    /// # 戻り値
    /// ストアがidと領収書URLを割り当てた請求書
    async fn create(&self, bill: NewBill, receipt: ReceiptFile) -> AppResult<Bill>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::features::bills::models::{BillStatus, BillType, Receipt};
    use crate::shared::errors::AppError;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// テスト用の請求書を作成する
    pub fn bill(id: &str, date: &str) -> Bill {
        Bill {
            id: id.to_string(),
            email: "a@a".to_string(),
            bill_type: BillType::Lodging,
            name: format!("bill {id}"),
            amount: 100.0,
            date: date.to_string(),
            vat: Some(20.0),
            pct: 20.0,
            commentary: None,
            receipt: Some(Receipt {
                file_url: format!("https://test.storage.tld/{id}.jpg"),
                file_name: format!("{id}.jpg"),
            }),
            status: BillStatus::Pending,
        }
    }

    /// 呼び出し回数を記録するメモリ上のストア
    #[derive(Default)]
    pub struct MockBillStore {
        pub bills: Mutex<Vec<Bill>>,
        pub list_error_status: Mutex<Option<u16>>,
        pub create_error_status: Mutex<Option<u16>>,
        pub created: Mutex<Vec<(NewBill, ReceiptFile)>>,
        pub list_calls: AtomicUsize,
        pub create_calls: AtomicUsize,
        /// 設定されている場合、一覧取得はこの通知を待ってから応答する
        pub list_gate: Option<Notify>,
        /// 呼び出しごとの応答（先頭から順に使い、それぞれの通知を待つ）
        pub queued_lists: Mutex<VecDeque<(Arc<Notify>, Vec<Bill>)>>,
    }

    impl MockBillStore {
        pub fn with_bills(bills: Vec<Bill>) -> Self {
            Self {
                bills: Mutex::new(bills),
                ..Self::default()
            }
        }

        pub fn failing_list(status: u16) -> Self {
            Self {
                list_error_status: Mutex::new(Some(status)),
                ..Self::default()
            }
        }

        pub fn gated(bills: Vec<Bill>) -> Self {
            Self {
                bills: Mutex::new(bills),
                list_gate: Some(Notify::new()),
                ..Self::default()
            }
        }

        /// 呼び出し順に別々の応答を返すストアと、各応答を解放する通知
        pub fn queued(responses: Vec<Vec<Bill>>) -> (Self, Vec<Arc<Notify>>) {
            let queue: VecDeque<(Arc<Notify>, Vec<Bill>)> = responses
                .into_iter()
                .map(|bills| (Arc::new(Notify::new()), bills))
                .collect();
            let gates = queue.iter().map(|(gate, _)| Arc::clone(gate)).collect();
            let store = Self {
                queued_lists: Mutex::new(queue),
                ..Self::default()
            };
            (store, gates)
        }

        pub fn fail_create_with(&self, status: Option<u16>) {
            *self.create_error_status.lock().unwrap() = status;
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BillStore for MockBillStore {
        async fn list(&self) -> AppResult<Vec<Bill>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let queued = self.queued_lists.lock().unwrap().pop_front();
            if let Some((gate, bills)) = queued {
                gate.notified().await;
                return Ok(bills);
            }
            if let Some(gate) = &self.list_gate {
                gate.notified().await;
            }
            if let Some(status) = *self.list_error_status.lock().unwrap() {
                return Err(AppError::api(status, "TEST", format!("Erreur {status}")));
            }
            Ok(self.bills.lock().unwrap().clone())
        }

        async fn create(&self, bill: NewBill, receipt: ReceiptFile) -> AppResult<Bill> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = *self.create_error_status.lock().unwrap() {
                return Err(AppError::api(status, "TEST", format!("Erreur {status}")));
            }

            let created = Bill {
                id: format!("bill-{}", self.create_calls()),
                email: bill.email.clone(),
                bill_type: bill.bill_type,
                name: bill.name.clone(),
                amount: bill.amount,
                date: bill.date.clone(),
                vat: bill.vat,
                pct: bill.pct,
                commentary: bill.commentary.clone(),
                receipt: Some(Receipt {
                    file_url: format!("https://test.storage.tld/{}", receipt.file_name),
                    file_name: bill.file_name.clone(),
                }),
                status: bill.status,
            };
            self.created.lock().unwrap().push((bill, receipt));
            Ok(created)
        }
    }
}
