//! Форматирование значений для таблиц и карточек

use chrono::{DateTime, Utc};

/// Разделитель тысяч: неразрывный пробел
pub fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// "$1 234.50"
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let whole = abs.trunc() as i64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as i64;
    let (whole, cents) = if cents == 100 { (whole + 1, 0) } else { (whole, cents) };
    format!("{}${}.{:02}", sign, format_thousands(whole), cents)
}

pub fn format_optional_money(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| "—".to_string())
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Координаты с 5 знаками (~1 м)
pub fn format_coords(lat: f64, lng: f64) -> String {
    format!("{:.5}, {:.5}", lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "$1\u{00a0}234.50");
        assert_eq!(format_money(-7.0), "-$7.00");
        assert_eq!(format_money(0.999), "$1.00");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(-1000000), "-1\u{00a0}000\u{00a0}000");
    }
}
