use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type VehicleId = Uuid;

/// A tracked car and its maintenance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Free-text label, also the key fuel entries are matched against
    pub model: String,
    /// Odometer reading at last update
    pub mileage: u32,
    /// Date of the last oil service
    pub oil_change_date: NaiveDate,
    /// Free-text descriptor (e.g. "good", "replace soon")
    pub tire_condition: String,
}

impl Vehicle {
    /// Create a new vehicle. The store assigns the final id on insertion.
    pub fn new(
        model: impl Into<String>,
        mileage: u32,
        oil_change_date: NaiveDate,
        tire_condition: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            mileage,
            oil_change_date,
            tire_condition: tire_condition.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_mileage(mut self, mileage: u32) -> Self {
        self.mileage = mileage;
        self
    }

    pub fn with_oil_change_date(mut self, date: NaiveDate) -> Self {
        self.oil_change_date = date;
        self
    }

    pub fn with_tire_condition(mut self, tire_condition: impl Into<String>) -> Self {
        self.tire_condition = tire_condition.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oil_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
    }

    #[test]
    fn test_create_vehicle() {
        let vehicle = Vehicle::new("Civic", 42_000, oil_date(), "good");

        assert_eq!(vehicle.model, "Civic");
        assert_eq!(vehicle.mileage, 42_000);
        assert_eq!(vehicle.oil_change_date, oil_date());
        assert_eq!(vehicle.tire_condition, "good");
    }

    #[test]
    fn test_builders_keep_id() {
        let original = Vehicle::new("Civic", 42_000, oil_date(), "good");
        let edited = original
            .clone()
            .with_model("Civic Si")
            .with_mileage(43_100)
            .with_tire_condition("worn");

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.model, "Civic Si");
        assert_eq!(edited.mileage, 43_100);
        assert_eq!(edited.oil_change_date, original.oil_change_date);
        assert_eq!(edited.tire_condition, "worn");
    }
}
