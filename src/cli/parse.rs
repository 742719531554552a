//! Text-to-type conversion for shell input.
//!
//! The core only ever sees typed values; anything that fails to parse here
//! aborts the command before a store is touched.

use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::application::AppError;
use crate::domain::{UnitMode, parse_amount};

/// Split a command line into words. Double or single quotes group words
/// containing spaces; quotes are not nested and there are no escapes.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        bail!("Unterminated quote in: {}", line);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse a real number typed into a form field.
pub fn parse_number(field: &'static str, input: &str) -> Result<f64, AppError> {
    parse_amount(input).map_err(|_| AppError::InvalidNumber {
        field,
        value: input.to_string(),
    })
}

/// Parse an odometer reading (whole, non-negative).
pub fn parse_mileage(input: &str) -> Result<u32, AppError> {
    input.trim().parse().map_err(|_| AppError::InvalidNumber {
        field: "mileage",
        value: input.to_string(),
    })
}

/// Parse a calendar date in ISO 8601 form (YYYY-MM-DD).
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(input.to_string()))
}

/// Parse a purchase date. The day is taken in the local calendar and
/// pinned to midday so it stays on that day once stored as UTC.
pub fn parse_entry_date(input: &str) -> Result<DateTime<Utc>, AppError> {
    let date = parse_date(input)?;
    local_midday(date)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidDate(input.to_string()))
}

/// Parse a month (YYYY-MM) into a local reference date inside that month.
pub fn parse_month(input: &str) -> Result<DateTime<Local>, AppError> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidMonth(input.to_string()))?;
    local_midday(date).ok_or_else(|| AppError::InvalidMonth(input.to_string()))
}

pub fn parse_unit(input: &str) -> Result<UnitMode, AppError> {
    input
        .parse()
        .map_err(|_| AppError::InvalidUnit(input.to_string()))
}

/// Convert 1-based row numbers as shown in listings to list positions.
pub fn rows_to_offsets(kind: &'static str, rows: &[usize]) -> Result<Vec<usize>, AppError> {
    rows.iter()
        .map(|&row| row_to_offset(kind, row))
        .collect()
}

pub fn row_to_offset(kind: &'static str, row: usize) -> Result<usize, AppError> {
    row.checked_sub(1)
        .ok_or(AppError::RowNotFound { kind, row })
}

fn local_midday(date: NaiveDate) -> Option<DateTime<Local>> {
    let midday = date.and_hms_opt(12, 0, 0)?;
    Local.from_local_datetime(&midday).earliest()
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn test_split_args() {
        assert_eq!(
            split_args("car add Civic --mileage 42000").unwrap(),
            vec!["car", "add", "Civic", "--mileage", "42000"]
        );
        assert_eq!(
            split_args("  fuel add --car \"Model 3\"  --cost '12.5' ").unwrap(),
            vec!["fuel", "add", "--car", "Model 3", "--cost", "12.5"]
        );
        assert_eq!(split_args("car add \"\"").unwrap(), vec!["car", "add", ""]);
        assert!(split_args("").unwrap().is_empty());
    }

    #[test]
    fn test_split_args_unterminated_quote() {
        assert!(split_args("car add \"Civic").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("cost", "12.5").unwrap(), 12.5);
        assert!(matches!(
            parse_number("cost", "twelve"),
            Err(AppError::InvalidNumber { field: "cost", .. })
        ));
    }

    #[test]
    fn test_parse_mileage() {
        assert_eq!(parse_mileage("42000").unwrap(), 42_000);
        assert!(parse_mileage("-5").is_err());
        assert!(parse_mileage("12.5").is_err());
        assert!(parse_mileage("").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert!(matches!(parse_date("05/03/2024"), Err(AppError::InvalidDate(_))));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_entry_date_keeps_local_day() {
        let date = parse_entry_date("2024-03-05").unwrap();
        let local = date.with_timezone(&Local);

        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_month() {
        let reference = parse_month("2024-03").unwrap();
        assert_eq!((reference.year(), reference.month()), (2024, 3));

        assert!(matches!(parse_month("2024-13"), Err(AppError::InvalidMonth(_))));
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("kpl").unwrap(), UnitMode::VolumePerDistance);
        assert!(matches!(parse_unit("lph"), Err(AppError::InvalidUnit(_))));
    }

    #[test]
    fn test_rows_to_offsets() {
        assert_eq!(rows_to_offsets("car", &[1, 3]).unwrap(), vec![0, 2]);
        assert!(matches!(
            rows_to_offsets("car", &[2, 0]),
            Err(AppError::RowNotFound { row: 0, .. })
        ));
    }
}
