use crate::shared::errors::AppError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 請求書の割合（pct）が未指定のときの既定値
pub const DEFAULT_PCT: f64 = 20.0;

/// 経費の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillType {
    #[serde(rename = "Transports", alias = "Transport")]
    Transports,
    #[serde(rename = "Restaurants et bars")]
    Restaurants,
    #[serde(rename = "Hôtel et logement")]
    Lodging,
    #[serde(rename = "Services en ligne")]
    OnlineServices,
    #[serde(rename = "IT et électronique")]
    Electronics,
    #[serde(rename = "Equipement et matériel")]
    Equipment,
    #[serde(rename = "Fournitures de bureau")]
    OfficeSupplies,
}

impl BillType {
    pub const ALL: [BillType; 7] = [
        BillType::Transports,
        BillType::Restaurants,
        BillType::Lodging,
        BillType::OnlineServices,
        BillType::Electronics,
        BillType::Equipment,
        BillType::OfficeSupplies,
    ];

    /// 保存・表示に使うラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillType::Transports => "Transports",
            BillType::Restaurants => "Restaurants et bars",
            BillType::Lodging => "Hôtel et logement",
            BillType::OnlineServices => "Services en ligne",
            BillType::Electronics => "IT et électronique",
            BillType::Equipment => "Equipement et matériel",
            BillType::OfficeSupplies => "Fournitures de bureau",
        }
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "Transport" {
            return Ok(BillType::Transports);
        }
        BillType::ALL
            .into_iter()
            .find(|t| t.label() == trimmed)
            .ok_or_else(|| AppError::validation(format!("未対応の経費種別です: {trimmed}")))
    }
}

/// 請求書のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 一覧に表示するラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

/// アップロード済み領収書への参照
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub file_url: String,
    pub file_name: String,
}

/// 請求書（経費精算）
///
/// ストア境界で`BillRecord`から検証済みで作られる。
/// `date`は保存形式のまま保持し、表示時に整形する。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: BillType,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: f64,
    pub commentary: Option<String>,
    pub receipt: Option<Receipt>,
    pub status: BillStatus,
}

/// APIサーバー上の請求書レコード（ワイヤー形式）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: BillType,
    pub name: String,
    pub amount: f64,
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub vat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub pct: Option<f64>,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub status: BillStatus,
}

/// 数値または数値文字列を受け付ける（フォーム入力がそのまま保存されている）
///
/// 空文字列と`null`は`None`になる。
fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(number)) => Ok(Some(number)),
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("数値ではありません: {trimmed}")))
        }
    }
}

impl TryFrom<BillRecord> for Bill {
    type Error = AppError;

    fn try_from(record: BillRecord) -> Result<Self, Self::Error> {
        if !record.amount.is_finite() || record.amount < 0.0 {
            return Err(AppError::validation(format!(
                "請求書 {} の金額が不正です: {}",
                record.id, record.amount
            )));
        }

        let pct = record.pct.unwrap_or(DEFAULT_PCT);
        if !pct.is_finite() {
            return Err(AppError::validation(format!(
                "請求書 {} の割合が不正です",
                record.id
            )));
        }

        let receipt = match (record.file_url, record.file_name) {
            (Some(file_url), Some(file_name)) => Some(Receipt {
                file_url,
                file_name,
            }),
            (None, None) => None,
            _ => {
                return Err(AppError::validation(format!(
                    "請求書 {} の領収書URLとファイル名が揃っていません",
                    record.id
                )))
            }
        };

        Ok(Bill {
            id: record.id,
            email: record.email,
            bill_type: record.bill_type,
            name: record.name,
            amount: record.amount,
            date: record.date,
            vat: record.vat,
            pct,
            commentary: record.commentary,
            receipt,
            status: record.status,
        })
    }
}

/// 新規作成する請求書（idと領収書URLはストアが割り当てる）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: BillType,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: f64,
    pub commentary: Option<String>,
    pub file_name: String,
    pub status: BillStatus,
}
