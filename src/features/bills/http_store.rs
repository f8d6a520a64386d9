//! APIサーバー経由の請求書ストア
//!
//! `GET /bills` で一覧を、`POST /bills`（マルチパート）で領収書付きの作成を行う。

use crate::features::bills::models::{Bill, BillRecord, NewBill};
use crate::features::bills::store::BillStore;
use crate::features::receipts::models::ReceiptFile;
use crate::shared::api_client::ApiClient;
use crate::shared::context::Session;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::multipart;

const BILLS_ENDPOINT: &str = "/bills";

/// HTTPで通信する請求書ストア
pub struct HttpBillStore {
    client: ApiClient,
    auth_token: Option<String>,
}

impl HttpBillStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            auth_token: None,
        }
    }

    /// セッションのトークンで認証するストアを作成
    pub fn for_session(client: ApiClient, session: &Session) -> Self {
        Self {
            client,
            auth_token: session.token.clone(),
        }
    }
}

/// ワイヤー形式のレコードを検証済みの請求書に変換する
///
/// 不正なレコードはログに残して除外し、残りは返す。
pub fn parse_bill_records(records: Vec<serde_json::Value>) -> Vec<Bill> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let parsed = serde_json::from_value::<BillRecord>(value)
                .map_err(AppError::from)
                .and_then(Bill::try_from);
            match parsed {
                Ok(bill) => Some(bill),
                Err(e) => {
                    warn!("不正な請求書レコードを除外しました: index={index}, error={e}");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let records: Vec<serde_json::Value> = self
            .client
            .get(BILLS_ENDPOINT, self.auth_token.as_deref())
            .await?;

        let total = records.len();
        let bills = parse_bill_records(records);
        info!("請求書一覧を受信しました: total={total}, valid={}", bills.len());
        Ok(bills)
    }

    async fn create(&self, bill: NewBill, receipt: ReceiptFile) -> AppResult<Bill> {
        let bill_json = serde_json::to_string(&bill)?;
        let ReceiptFile {
            file_name,
            content_type,
            bytes,
        } = receipt;

        let build_form = || -> AppResult<multipart::Form> {
            let file_part = multipart::Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(&content_type)
                .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;
            let bill_part = multipart::Part::text(bill_json.clone())
                .mime_str("application/json")
                .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;

            Ok(multipart::Form::new()
                .part("bill", bill_part)
                .text("email", bill.email.clone())
                .part("file", file_part))
        };

        let record: BillRecord = self
            .client
            .post_multipart(BILLS_ENDPOINT, build_form, self.auth_token.as_deref())
            .await?;

        let created = Bill::try_from(record)?;
        info!("請求書を作成しました: id={}", created.id);
        Ok(created)
    }
}
