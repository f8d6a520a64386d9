use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// 日付の整形
pub mod date_format;

/// 日付文字列のバリデーション
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # バリデーション規則
/// - YYYY-MM-DD形式であること
/// - 実在する日付であること
/// - 1900年以降、2100年以前であること
pub fn validate_date(date_str: &str) -> AppResult<()> {
    if date_str.len() != 10 {
        return Err(AppError::validation(
            "日付はYYYY-MM-DD形式で入力してください",
        ));
    }

    if (date_str.chars().nth(4) != Some('-')) || (date_str.chars().nth(7) != Some('-')) {
        return Err(AppError::validation(
            "日付はYYYY-MM-DD形式で入力してください",
        ));
    }

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation("無効な日付です"))?;

    let year = date.year();
    if !(1900..=2100).contains(&year) {
        return Err(AppError::validation(
            "日付は1900年から2100年の間で入力してください",
        ));
    }

    Ok(())
}

/// フォームの数値フィールドを解析する
///
/// # 引数
/// * `value` - 入力値
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 空欄の場合は`None`、数値の場合は`Some`
pub fn parse_optional_number(value: &str, field_name: &str) -> AppResult<Option<f64>> {
    let normalized = normalize_string(value).replace(',', ".");
    if normalized.is_empty() {
        return Ok(None);
    }

    let number: f64 = normalized
        .parse()
        .map_err(|_| AppError::validation(format!("{field_name}は数値で入力してください")))?;

    if !number.is_finite() {
        return Err(AppError::validation(format!("{field_name}が無効な数値です")));
    }

    Ok(Some(number))
}

/// 金額のバリデーション
///
/// # バリデーション規則
/// - 0以上の有限な数値であること
/// - 10桁以内であること
pub fn validate_amount(amount: f64) -> AppResult<()> {
    if !amount.is_finite() {
        return Err(AppError::validation("無効な金額です"));
    }

    if amount < 0.0 {
        return Err(AppError::validation("金額は0以上で入力してください"));
    }

    if amount >= 10_000_000_000.0 {
        return Err(AppError::validation("金額は10桁以内で入力してください"));
    }

    Ok(())
}

/// 必須フィールドのバリデーション
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// 文字列の正規化（前後の空白を削除）
pub fn normalize_string(text: &str) -> String {
    text.trim().to_string()
}

/// 空欄を`None`にした正規化済み文字列
pub fn non_empty(text: &str) -> Option<String> {
    let normalized = normalize_string(text);
    (!normalized.is_empty()).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        // 有効な日付
        assert!(validate_date("2024-01-01").is_ok());
        assert!(validate_date("2000-02-29").is_ok()); // うるう年

        // 無効な日付
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("24-01-01").is_err());
        assert!(validate_date("2024/01/01").is_err());
        assert!(validate_date("1899-01-01").is_err());
    }

    #[test]
    fn test_parse_optional_number() {
        assert_eq!(parse_optional_number("50", "金額").unwrap(), Some(50.0));
        assert_eq!(parse_optional_number(" 12,5 ", "金額").unwrap(), Some(12.5));
        assert_eq!(parse_optional_number("", "金額").unwrap(), None);
        assert_eq!(parse_optional_number("   ", "金額").unwrap(), None);
        assert!(parse_optional_number("abc", "金額").is_err());
        assert!(parse_optional_number("inf", "金額").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(50.0).is_ok());
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(10_000_000_000.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        assert!(validate_required_field("Essence", "名称").is_ok());
        assert!(validate_required_field("   ", "名称").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  note "), Some("note".to_string()));
        assert_eq!(non_empty("   "), None);
    }
}
