use std::sync::mpsc::Receiver;

use chrono::{DateTime, Datelike, TimeZone};

use crate::domain::{
    FuelEntry, FuelEntryId, FuelEntryUpdate, UnitMode, Vehicle, VehicleId, economy,
    find_vehicle_by_model, mileage_display, monthly_breakdown, monthly_total,
};
use crate::storage::{FuelLedger, StoreEvent, VehicleStore};

use super::{AppError, ExpenseReport, ExpenseRow, FuelLogRow, MonthlyReport};

/// Application service owning the vehicle store and the fuel ledger.
/// This is the primary interface for any client (shell, tests, a future UI).
#[derive(Debug, Default)]
pub struct GarageService {
    vehicles: VehicleStore,
    fuel: FuelLedger,
}

impl GarageService {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Vehicle operations
    // ========================

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> VehicleId {
        self.vehicles.add(vehicle)
    }

    /// Replace a vehicle by id. Returns `false` if it is not tracked.
    pub fn update_vehicle(&mut self, vehicle: Vehicle) -> bool {
        self.vehicles.update(vehicle)
    }

    pub fn remove_vehicle(&mut self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.remove(id)
    }

    pub fn remove_vehicles_at(&mut self, offsets: &[usize]) -> usize {
        self.vehicles.remove_at_offsets(offsets)
    }

    pub fn vehicle_at(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get_at(index)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.vehicles.list()
    }

    pub fn subscribe_vehicles(&mut self) -> Receiver<StoreEvent> {
        self.vehicles.subscribe()
    }

    // ========================
    // Fuel operations
    // ========================

    /// Record a fuel purchase for the car labelled `car_model`.
    /// The label is not checked against tracked vehicles, only for presence.
    pub fn record_fuel(
        &mut self,
        entry: FuelEntry,
        car_model: &str,
    ) -> Result<FuelEntryId, AppError> {
        if car_model.trim().is_empty() {
            return Err(AppError::MissingCarModel);
        }
        Ok(self.fuel.add(entry, car_model))
    }

    /// Returns `false` if no entry has this id.
    pub fn update_fuel_entry(&mut self, id: FuelEntryId, update: FuelEntryUpdate) -> bool {
        self.fuel.update(id, update)
    }

    pub fn remove_fuel_entry(&mut self, id: FuelEntryId) -> Option<FuelEntry> {
        self.fuel.remove(id)
    }

    pub fn remove_fuel_entries_at(&mut self, offsets: &[usize]) -> usize {
        self.fuel.remove_at_offsets(offsets)
    }

    pub fn fuel_entry_at(&self, index: usize) -> Option<&FuelEntry> {
        self.fuel.get_at(index)
    }

    pub fn fuel_entries(&self) -> &[FuelEntry] {
        self.fuel.list()
    }

    pub fn subscribe_fuel(&mut self) -> Receiver<StoreEvent> {
        self.fuel.subscribe()
    }

    // ========================
    // Metrics
    // ========================

    /// First tracked vehicle whose model matches the entry's label.
    pub fn vehicle_for_entry(&self, entry: &FuelEntry) -> Option<&Vehicle> {
        find_vehicle_by_model(&entry.car_model, self.vehicles.list())
    }

    /// Every entry with its economy in `unit`.
    pub fn fuel_log(&self, unit: UnitMode) -> Vec<FuelLogRow> {
        self.fuel
            .list()
            .iter()
            .map(|entry| FuelLogRow {
                entry: entry.clone(),
                unit,
                economy: economy(entry, unit),
            })
            .collect()
    }

    /// Spend in the calendar month of `reference`, in its time zone.
    pub fn monthly_total<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> f64 {
        monthly_total(self.fuel.list(), reference)
    }

    /// Expense rows for every entry, with the total for the month of `reference`.
    pub fn expense_report<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> ExpenseReport {
        let vehicles = self.vehicles.list();
        let rows = self
            .fuel
            .list()
            .iter()
            .map(|entry| ExpenseRow {
                entry: entry.clone(),
                mileage: mileage_display(entry, vehicles),
            })
            .collect();

        ExpenseReport {
            rows,
            year: reference.year(),
            month: reference.month(),
            monthly_total: self.monthly_total(reference),
        }
    }

    /// Spend per calendar month in `tz`.
    pub fn monthly_report<Tz: TimeZone>(&self, tz: &Tz) -> MonthlyReport {
        let months = monthly_breakdown(self.fuel.list(), tz);
        let total = months.iter().fold(0.0, |sum, m| sum + m.total);

        MonthlyReport {
            months,
            total,
            entry_count: self.fuel.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn civic() -> Vehicle {
        Vehicle::new("Civic", 42_000, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(), "good")
    }

    #[test]
    fn test_record_fuel_requires_car_model() {
        let mut service = GarageService::new();

        let result = service.record_fuel(FuelEntry::new(10.0, 2.0), "  ");

        assert!(matches!(result, Err(AppError::MissingCarModel)));
        assert!(service.fuel_entries().is_empty());
    }

    #[test]
    fn test_record_fuel_does_not_require_tracked_vehicle() {
        let mut service = GarageService::new();

        let id = service.record_fuel(FuelEntry::new(10.0, 2.0), "Golf").unwrap();

        let entry = &service.fuel_entries()[0];
        assert_eq!(entry.id, id);
        assert!(service.vehicle_for_entry(entry).is_none());
    }

    #[test]
    fn test_fuel_log_uses_selected_unit() {
        let mut service = GarageService::new();
        service.record_fuel(FuelEntry::new(10.0, 2.0), "Civic").unwrap();
        service.record_fuel(FuelEntry::new(10.0, 0.0), "Civic").unwrap();

        let mpg = service.fuel_log(UnitMode::DistancePerVolume);
        let kpl = service.fuel_log(UnitMode::VolumePerDistance);

        assert_eq!(mpg[0].economy, Some(5.0));
        assert_eq!(mpg[1].economy, None);
        assert_eq!(kpl[0].economy, Some(0.2));
        assert_eq!(kpl[1].economy, Some(0.0));
    }

    #[test]
    fn test_entries_survive_vehicle_removal() {
        let mut service = GarageService::new();
        let vehicle_id = service.add_vehicle(civic());
        service.record_fuel(FuelEntry::new(10.0, 2.0), "Civic").unwrap();
        let reference = Utc::now();

        assert_eq!(service.expense_report(&reference).rows[0].mileage, "5.00");

        service.remove_vehicle(vehicle_id);

        assert_eq!(service.fuel_entries().len(), 1);
        assert_eq!(service.expense_report(&reference).rows[0].mileage, "N/A");
    }

    #[test]
    fn test_monthly_report_totals() {
        let mut service = GarageService::new();
        for (month, cost) in [(1, 10.0), (1, 15.0), (2, 20.0)] {
            let date = Utc.with_ymd_and_hms(2024, month, 3, 9, 0, 0).unwrap();
            service
                .record_fuel(FuelEntry::new(30.0, cost).with_date(date), "Civic")
                .unwrap();
        }

        let report = service.monthly_report(&Utc);

        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].total, 25.0);
        assert_eq!(report.total, 45.0);
        assert_eq!(report.entry_count, 3);
    }
}
