use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type FuelEntryId = Uuid;

/// A single fuel purchase.
///
/// `car_model` is a plain label, not a key: it is compared by string
/// equality against [`Vehicle::model`](super::Vehicle) when the two are
/// cross-referenced, so entries outlive renamed or deleted vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelEntry {
    pub id: FuelEntryId,
    /// When the purchase happened
    pub date: DateTime<Utc>,
    /// Model label stamped by the ledger at insertion
    pub car_model: String,
    /// Volume bought; the unit is whatever the user had selected
    pub fuel_quantity: f64,
    /// Amount paid, currency unspecified
    pub cost: f64,
}

impl FuelEntry {
    /// Create an entry dated now. The ledger assigns the final id and
    /// stamps the car model on insertion.
    pub fn new(fuel_quantity: f64, cost: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            car_model: String::new(),
            fuel_quantity,
            cost,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_car_model(mut self, car_model: impl Into<String>) -> Self {
        self.car_model = car_model.into();
        self
    }
}

/// Partial update of the mutable fields of a [`FuelEntry`].
/// The car model cannot be changed after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelEntryUpdate {
    pub date: Option<DateTime<Utc>>,
    pub fuel_quantity: Option<f64>,
    pub cost: Option<f64>,
}

impl FuelEntryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn fuel_quantity(mut self, fuel_quantity: f64) -> Self {
        self.fuel_quantity = Some(fuel_quantity);
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.fuel_quantity.is_none() && self.cost.is_none()
    }

    /// Apply the present fields onto `entry`, leaving the others alone.
    pub fn apply_to(&self, entry: &mut FuelEntry) {
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(fuel_quantity) = self.fuel_quantity {
            entry.fuel_quantity = fuel_quantity;
        }
        if let Some(cost) = self.cost {
            entry.cost = cost;
        }
    }
}
