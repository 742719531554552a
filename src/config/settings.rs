//! User settings
//!
//! Display preferences read from an optional TOML file. Every field has a
//! default, so a partial (or missing) file is fine.

use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::AppError;
use crate::domain::UnitMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Economy unit shown until changed in the session
    #[serde(default)]
    pub unit: UnitMode,

    /// Prefix for costs in listings
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Label printed after fuel quantities
    #[serde(default = "default_volume_label")]
    pub volume_label: String,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

fn default_volume_label() -> String {
    "liters".to_string()
}

// Time-of-day and offset specifiers parse fine but fail when applied to a
// `NaiveDate`, so try a real render.
fn renders_dates(format: &str) -> bool {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return false;
    }

    let sample = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default();
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format_with_items(items.iter())).is_ok()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: UnitMode::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            volume_label: default_volume_label(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_toml(&contents).map_err(|source| AppError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), unit = %settings.unit, "settings loaded");
        Ok(settings)
    }

    /// Load settings from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse settings, rejecting date formats chrono cannot render for a
    /// plain calendar date.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let settings: Self = toml::from_str(contents)?;

        if !renders_dates(&settings.date_format) {
            return Err(serde::de::Error::custom(format!(
                "invalid date_format '{}'",
                settings.date_format
            )));
        }
        Ok(settings)
    }

    /// Format a cost with the configured currency symbol.
    pub fn format_cost(&self, cost: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, cost)
    }
}
