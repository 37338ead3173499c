//! Month-year date parsing for the CSV `date` column.

use chrono::NaiveDate;

/// Full English month names; the only spellings the `date` column accepts.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parses a `"<FullMonthName> <4-digit year>"` value, e.g. `"February 2025"`.
///
/// Source data never carries a day, so the result is pinned to the first of
/// the month. Month names must match the full English spelling exactly and the
/// year must be exactly four digits; anything else returns `None`.
pub fn parse_month_year(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split_whitespace();
    let month_name = parts.next()?;
    let year_text = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let month = MONTH_NAMES.iter().position(|m| *m == month_name)? as u32 + 1;

    if year_text.len() != 4 || !year_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year_text.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_month_and_year() {
        assert_eq!(
            parse_month_year("February 2025"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(
            parse_month_year("December 1999"),
            NaiveDate::from_ymd_opt(1999, 12, 1)
        );
    }

    #[test]
    fn test_tolerates_extra_inner_whitespace() {
        assert_eq!(
            parse_month_year("January   2022"),
            NaiveDate::from_ymd_opt(2022, 1, 1)
        );
    }

    #[test]
    fn test_rejects_abbreviated_month() {
        assert_eq!(parse_month_year("Feb 2025"), None);
    }

    #[test]
    fn test_rejects_wrong_case() {
        assert_eq!(parse_month_year("february 2025"), None);
        assert_eq!(parse_month_year("FEBRUARY 2025"), None);
    }

    #[test]
    fn test_rejects_non_four_digit_year() {
        assert_eq!(parse_month_year("February 25"), None);
        assert_eq!(parse_month_year("February 02025"), None);
        assert_eq!(parse_month_year("February 20a5"), None);
    }

    #[test]
    fn test_rejects_reordered_or_extra_tokens() {
        assert_eq!(parse_month_year("2025 February"), None);
        assert_eq!(parse_month_year("February 2025 01"), None);
        assert_eq!(parse_month_year("InvalidDate"), None);
        assert_eq!(parse_month_year(""), None);
    }
}
