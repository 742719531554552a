//! Derived fuel statistics.
//!
//! Everything here is a pure function over slices of entries and vehicles.
//! Nothing is cached: callers recompute on every read.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use super::{FuelEntry, UnitMode, Vehicle, format_economy};

/// Per-entry fuel economy in the given display unit.
///
/// The ratio is cost-normalized: `fuel_quantity / cost` for
/// [`UnitMode::DistancePerVolume`] and `cost / fuel_quantity` for
/// [`UnitMode::VolumePerDistance`]. No odometer delta is involved, even
/// though the entry form collects one. The figure is kept exactly as users
/// have always seen it; it is not a true distance-per-volume measure.
///
/// Returns `None` when the divisor is zero or the ratio is otherwise not a
/// finite number.
pub fn economy(entry: &FuelEntry, unit: UnitMode) -> Option<f64> {
    let (numerator, divisor) = match unit {
        UnitMode::DistancePerVolume => (entry.fuel_quantity, entry.cost),
        UnitMode::VolumePerDistance => (entry.cost, entry.fuel_quantity),
    };

    if divisor == 0.0 {
        return None;
    }

    let ratio = numerator / divisor;
    ratio.is_finite().then_some(ratio)
}

/// Sum of costs of the entries falling in the same calendar year and month
/// as `reference`.
///
/// Entry dates are converted into the reference's time zone before the
/// comparison, so passing `Local::now()` gives "this month" in the caller's
/// local calendar.
pub fn monthly_total<Tz: TimeZone>(entries: &[FuelEntry], reference: &DateTime<Tz>) -> f64 {
    let tz = reference.timezone();
    let (year, month) = (reference.year(), reference.month());

    entries
        .iter()
        .filter(|entry| {
            let local = entry.date.with_timezone(&tz);
            local.year() == year && local.month() == month
        })
        .fold(0.0, |total, entry| total + entry.cost)
}

/// First vehicle, in insertion order, whose model equals `car_model`
/// exactly (case-sensitive).
pub fn find_vehicle_by_model<'a>(car_model: &str, vehicles: &'a [Vehicle]) -> Option<&'a Vehicle> {
    vehicles.iter().find(|vehicle| vehicle.model == car_model)
}

/// Mileage figure shown on the expenses screen.
///
/// Only entries whose car model matches a tracked vehicle get a figure
/// (the distance-per-volume economy); the rest, and undefined ratios,
/// show "N/A".
pub fn mileage_display(entry: &FuelEntry, vehicles: &[Vehicle]) -> String {
    match find_vehicle_by_model(&entry.car_model, vehicles) {
        Some(_) => format_economy(economy(entry, UnitMode::DistancePerVolume)),
        None => "N/A".to_string(),
    }
}

/// Spend for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
    pub count: usize,
}

impl MonthlyTotal {
    /// "YYYY-MM"
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Spend grouped by calendar month in `tz`, oldest month first.
/// Months without entries are omitted.
pub fn monthly_breakdown<Tz: TimeZone>(entries: &[FuelEntry], tz: &Tz) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();

    for entry in entries {
        let local = entry.date.with_timezone(tz);
        let slot = months.entry((local.year(), local.month())).or_insert((0.0, 0));
        slot.0 += entry.cost;
        slot.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (total, count))| MonthlyTotal {
            year,
            month,
            total,
            count,
        })
        .collect()
}
