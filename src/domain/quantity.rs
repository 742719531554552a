use std::fmt;

/// Format a volume, cost or ratio with two decimal places.
/// Example: 5.0 -> "5.00", 0.2 -> "0.20"
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format an economy figure, rendering the undefined case as "N/A".
pub fn format_economy(economy: Option<f64>) -> String {
    match economy {
        Some(value) => format_amount(value),
        None => "N/A".to_string(),
    }
}

/// Parse a decimal string typed by the user into a real number.
/// Example: "40" -> 40.0, "12.5" -> 12.5, " 3.75 " -> 3.75
///
/// Only the type is checked: zero and negative values are accepted, while
/// `NaN` and infinities are rejected.
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let value: f64 = input.parse().map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty number"),
            ParseAmountError::InvalidFormat => write!(f, "invalid number format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
