//! Даты, которые системные API (`admins`, `settings`) отдают строкой RFC 3339

use chrono::{DateTime, Utc};

use crate::shared::format;

/// Строка RFC 3339 в формате таблиц; нераспознанное значение возвращается как есть
pub fn format_datetime(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => format::format_datetime(&dt.with_timezone(&Utc)),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59+02:00"), "2024-12-31 21:59");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
    }
}
