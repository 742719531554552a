use serde::{Deserialize, Serialize};

use crate::domain::{FuelEntry, MonthlyTotal, UnitMode};

/// One row of the fuel log: the entry plus its economy in the selected unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelLogRow {
    pub entry: FuelEntry,
    pub unit: UnitMode,
    /// `None` when the ratio is undefined (zero divisor)
    pub economy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub entry: FuelEntry,
    /// Economy figure when the car model matches a tracked vehicle, "N/A" otherwise
    pub mileage: String,
}

/// Expenses screen: every entry, plus the spend for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub rows: Vec<ExpenseRow>,
    pub year: i32,
    pub month: u32,
    pub monthly_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyTotal>,
    pub total: f64,
    pub entry_count: usize,
}
