use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display unit selected when reading fuel economy.
///
/// The unit only chooses which of the two economy ratios is shown; no
/// conversion between miles/kilometers or gallons/liters takes place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitMode {
    /// "Miles per Gallon"
    #[default]
    #[serde(rename = "mpg")]
    DistancePerVolume,
    /// "Kilometers per Liter"
    #[serde(rename = "kpl")]
    VolumePerDistance,
}

impl UnitMode {
    pub const ALL: [UnitMode; 2] = [UnitMode::DistancePerVolume, UnitMode::VolumePerDistance];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitMode::DistancePerVolume => "mpg",
            UnitMode::VolumePerDistance => "kpl",
        }
    }

    /// Human-readable label shown next to economy figures.
    pub fn label(&self) -> &'static str {
        match self {
            UnitMode::DistancePerVolume => "Miles per Gallon",
            UnitMode::VolumePerDistance => "Kilometers per Liter",
        }
    }
}

impl std::fmt::Display for UnitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitModeError(pub String);

impl std::fmt::Display for ParseUnitModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown unit '{}' (expected mpg or kpl)", self.0)
    }
}

impl std::error::Error for ParseUnitModeError {}

impl FromStr for UnitMode {
    type Err = ParseUnitModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mpg" => Ok(UnitMode::DistancePerVolume),
            "kpl" => Ok(UnitMode::VolumePerDistance),
            _ => Err(ParseUnitModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mode_roundtrip() {
        for unit in UnitMode::ALL {
            let parsed: UnitMode = unit.as_str().parse().unwrap();
            assert_eq!(unit, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("KPL".parse::<UnitMode>(), Ok(UnitMode::VolumePerDistance));
        assert_eq!(" Mpg ".parse::<UnitMode>(), Ok(UnitMode::DistancePerVolume));
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert!("l/100km".parse::<UnitMode>().is_err());
    }

    #[test]
    fn test_default_is_first_picker_segment() {
        assert_eq!(UnitMode::default(), UnitMode::DistancePerVolume);
        assert_eq!(UnitMode::default().label(), "Miles per Gallon");
    }
}
