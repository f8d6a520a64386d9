use chrono::{DateTime, Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 日付の整形に失敗したことを表すエラー
///
/// 呼び出し側で生の値にフォールバックして回復する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("日付を整形できません: {raw}")]
pub struct FormatError {
    pub raw: String,
}

/// 日付表示のロケール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    /// 「4 Avr. 04」形式
    #[default]
    French,
    /// 「2004年4月4日」形式
    Japanese,
}

impl FromStr for DateLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "fr-fr" | "french" => Ok(DateLocale::French),
            "ja" | "ja-jp" | "japanese" => Ok(DateLocale::Japanese),
            other => Err(format!("未対応のロケールです: {other}")),
        }
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLocale::French => write!(f, "fr"),
            DateLocale::Japanese => write!(f, "ja"),
        }
    }
}

/// フランス語の月略称（先頭3文字、大文字始まり）
const FRENCH_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// 保存された日付文字列を表示用に整形する
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormatter {
    locale: DateLocale,
}

impl DateFormatter {
    pub fn new(locale: DateLocale) -> Self {
        Self { locale }
    }

    /// 生の日付を表示用文字列に変換する
    ///
    /// # 引数
    /// * `raw` - 保存形式の日付（YYYY-MM-DD、またはRFC3339）
    ///
    /// # 戻り値
    /// 整形された日付、解析できない場合は`FormatError`
    pub fn format(&self, raw: &str) -> Result<String, FormatError> {
        let date = parse_stored_date(raw).ok_or_else(|| FormatError {
            raw: raw.to_string(),
        })?;

        let formatted = match self.locale {
            DateLocale::French => {
                let month = FRENCH_MONTHS[date.month0() as usize];
                let year = date.year().rem_euclid(100);
                format!("{} {month}. {year:02}", date.day())
            }
            DateLocale::Japanese => {
                format!("{}年{}月{}日", date.year(), date.month(), date.day())
            }
        };

        Ok(formatted)
    }

    /// 並び替え用のキーを返す
    ///
    /// 表示文字列はロケールによって順序が保証されないため、常に生の値を使う。
    pub fn sort_key<'a>(&self, raw: &'a str) -> &'a str {
        raw
    }
}

/// 保存形式の日付を解析する
fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_french() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(formatter.format("2001-01-01").unwrap(), "1 Jan. 01");
        assert_eq!(formatter.format("2021-12-25").unwrap(), "25 Déc. 21");
        assert_eq!(formatter.format("2003-03-03").unwrap(), "3 Mar. 03");
    }

    #[test]
    fn test_format_french_june_and_july_share_abbreviation() {
        let formatter = DateFormatter::new(DateLocale::French);
        assert_eq!(formatter.format("2022-06-10").unwrap(), "10 Jui. 22");
        assert_eq!(formatter.format("2022-07-10").unwrap(), "10 Jui. 22");
    }

    #[test]
    fn test_format_japanese() {
        let formatter = DateFormatter::new(DateLocale::Japanese);
        assert_eq!(formatter.format("2004-04-04").unwrap(), "2004年4月4日");
    }

    #[test]
    fn test_format_rfc3339() {
        let formatter = DateFormatter::default();
        assert_eq!(
            formatter.format("2002-02-02T10:00:00+09:00").unwrap(),
            "2 Fév. 02"
        );
    }

    #[test]
    fn test_format_invalid() {
        let formatter = DateFormatter::default();
        assert_eq!(
            formatter.format("not-a-date"),
            Err(FormatError {
                raw: "not-a-date".to_string()
            })
        );
        assert!(formatter.format("2024-02-30").is_err());
        assert!(formatter.format("").is_err());
    }

    #[test]
    fn test_sort_key_is_raw_value() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.sort_key("2004-04-04"), "2004-04-04");
        assert_eq!(formatter.sort_key("garbage"), "garbage");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("fr".parse::<DateLocale>().unwrap(), DateLocale::French);
        assert_eq!("JA".parse::<DateLocale>().unwrap(), DateLocale::Japanese);
        assert!("de".parse::<DateLocale>().is_err());
        assert_eq!(DateLocale::Japanese.to_string(), "ja");
    }
}
