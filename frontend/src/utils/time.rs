use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Date part of a server timestamp such as `2025-03-01` or
/// `2025-03-01T14:00:00`.
pub fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_prefix_ignores_time_part() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(parse_date_prefix("2025-03-01"), Some(expected));
        assert_eq!(parse_date_prefix("2025-03-01T14:00:00"), Some(expected));
        assert_eq!(parse_date_prefix(" 2025-03-01T00:00:00.000Z "), Some(expected));
    }

    #[test]
    fn parse_date_prefix_rejects_garbage() {
        assert_eq!(parse_date_prefix(""), None);
        assert_eq!(parse_date_prefix("01/03/2025"), None);
    }
}
