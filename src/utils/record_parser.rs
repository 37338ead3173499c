//! Row-level CSV parsing: header mapping and typed record extraction.
//!
//! Column lookup is case-insensitive and whitespace-trimmed. The parser only
//! checks *format* (is this an integer, is this a month-year date); range
//! rules such as non-negativity belong to the batch validator.

use std::collections::HashMap;
use std::str::FromStr;

use num_bigint::BigInt;
use serde_json::json;

use crate::domain::entities::NewTalk;
use crate::error::AppError;
use crate::utils::month_format::parse_month_year;

/// Columns every import file must carry, in canonical (lowercase) form.
pub const REQUIRED_COLUMNS: [&str; 6] = ["title", "author", "views", "likes", "date", "link"];

/// Builds a CSV reader with the import-file conventions: first row is the
/// header, fields are trimmed, and short rows are tolerated (treated as
/// missing fields rather than hard read errors).
pub fn csv_reader(data: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data)
}

/// Maps a CSV read failure to the generic infrastructure-tier error.
///
/// Read failures carry no row detail; they mean the input itself could not be
/// consumed, not that a row failed validation.
pub fn read_failure(e: &csv::Error) -> AppError {
    AppError::bad_request("Failed to read CSV file", json!({ "reason": e.to_string() }))
}

/// Case-insensitive header-name → column-index mapping.
///
/// Duplicate header names resolve to their first occurrence; empty header
/// cells are ignored.
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut columns = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim().to_ascii_lowercase();
            if !name.is_empty() {
                columns.entry(name).or_insert(idx);
            }
        }
        Self { columns }
    }

    /// True when every required column is present.
    pub fn has_all_required(&self) -> bool {
        REQUIRED_COLUMNS.iter().all(|c| self.columns.contains_key(*c))
    }

    /// Returns the trimmed value of `column` for `record`, or `None` when the
    /// column is absent, the row is too short, or the value is blank.
    pub fn get<'a>(&self, record: &'a csv::StringRecord, column: &str) -> Option<&'a str> {
        self.columns
            .get(column)
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// One data row with all required fields present and non-blank.
#[derive(Debug)]
pub struct RawTalkRow<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub views: &'a str,
    pub likes: &'a str,
    pub date: &'a str,
    pub link: &'a str,
}

impl<'a> RawTalkRow<'a> {
    /// Extracts the six required fields; `None` when any is missing or blank.
    pub fn extract(headers: &HeaderIndex, record: &'a csv::StringRecord) -> Option<Self> {
        Some(Self {
            title: headers.get(record, "title")?,
            author: headers.get(record, "author")?,
            views: headers.get(record, "views")?,
            likes: headers.get(record, "likes")?,
            date: headers.get(record, "date")?,
            link: headers.get(record, "link")?,
        })
    }
}

/// Typed failure for one unparseable row.
#[derive(Debug, thiserror::Error)]
pub enum RowParseError {
    #[error("missing or blank required field")]
    MissingField,
    #[error("invalid number in column '{0}'")]
    InvalidNumber(&'static str),
    #[error("invalid date")]
    InvalidDate,
}

/// Parses one pre-validated row into a persistable record.
///
/// Counts are parsed as arbitrary-precision integers; a negative value parses
/// fine here because the sign check is a validation rule, not a format rule.
pub fn parse_row(
    headers: &HeaderIndex,
    record: &csv::StringRecord,
) -> Result<NewTalk, RowParseError> {
    let raw = RawTalkRow::extract(headers, record).ok_or(RowParseError::MissingField)?;

    let views = BigInt::from_str(raw.views).map_err(|_| RowParseError::InvalidNumber("views"))?;
    let likes = BigInt::from_str(raw.likes).map_err(|_| RowParseError::InvalidNumber("likes"))?;
    let published_on = parse_month_year(raw.date).ok_or(RowParseError::InvalidDate)?;

    Ok(NewTalk {
        title: raw.title.to_string(),
        author: raw.author.to_string(),
        views,
        likes,
        published_on,
        link: raw.link.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn read_single_row(data: &str) -> (HeaderIndex, csv::StringRecord) {
        let mut reader = csv_reader(data.as_bytes());
        let headers = HeaderIndex::from_headers(reader.headers().unwrap());
        let record = reader.records().next().unwrap().unwrap();
        (headers, record)
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let (headers, record) = read_single_row(
            "Title,AUTHOR,Views,Likes,Date,LINK\n\
             AI Future,John Doe,1000,50,January 2022,https://ted.com/ai",
        );

        assert!(headers.has_all_required());
        assert_eq!(headers.get(&record, "title"), Some("AI Future"));
        assert_eq!(headers.get(&record, "link"), Some("https://ted.com/ai"));
    }

    #[test]
    fn test_columns_accepted_in_any_order() {
        let (headers, record) = read_single_row(
            "link,date,likes,views,author,title\n\
             https://ted.com/ai,January 2022,50,1000,John Doe,AI Future",
        );

        let talk = parse_row(&headers, &record).unwrap();
        assert_eq!(talk.title, "AI Future");
        assert_eq!(talk.views, BigInt::from(1000));
    }

    #[test]
    fn test_parse_row_happy_path() {
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             AI Future,John Doe,1000000,50000,January 2022,https://ted.com/ai_future",
        );

        let talk = parse_row(&headers, &record).unwrap();
        assert_eq!(talk.views, BigInt::from(1_000_000));
        assert_eq!(talk.likes, BigInt::from(50_000));
        assert_eq!(
            talk.published_on,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_row_keeps_arbitrary_precision() {
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             Big,Jane,123456789012345678901234567890,1,January 2022,https://ted.com/big",
        );

        let talk = parse_row(&headers, &record).unwrap();
        assert_eq!(
            talk.views.to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn test_parse_row_accepts_negative_counts() {
        // Sign checking is the validator's concern; format-wise this parses.
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             Neg,Jane,-5,1,January 2022,https://ted.com/neg",
        );

        let talk = parse_row(&headers, &record).unwrap();
        assert_eq!(talk.views, BigInt::from(-5));
    }

    #[test]
    fn test_parse_row_rejects_bad_number() {
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             Bad,Jane,INVALID_NUMBER,1,January 2022,https://ted.com/bad",
        );

        assert!(matches!(
            parse_row(&headers, &record),
            Err(RowParseError::InvalidNumber("views"))
        ));
    }

    #[test]
    fn test_parse_row_rejects_bad_date() {
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             Bad,Jane,1,1,NotADate,https://ted.com/bad",
        );

        assert!(matches!(
            parse_row(&headers, &record),
            Err(RowParseError::InvalidDate)
        ));
    }

    #[test]
    fn test_short_row_is_missing_field() {
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             OnlyTitle,Jane",
        );

        assert!(matches!(
            parse_row(&headers, &record),
            Err(RowParseError::MissingField)
        ));
    }

    #[test]
    fn test_blank_field_is_missing() {
        let (headers, record) = read_single_row(
            "title,author,views,likes,date,link\n\
             AI Future,,1000,50,January 2022,https://ted.com/ai",
        );

        assert!(RawTalkRow::extract(&headers, &record).is_none());
    }

    #[test]
    fn test_missing_required_header_detected() {
        let mut reader = csv_reader(b"title,author,views,likes,date\nrow" as &[u8]);
        let headers = HeaderIndex::from_headers(reader.headers().unwrap());
        assert!(!headers.has_all_required());
    }
}
