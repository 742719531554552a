use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

use crate::application::GarageService;
use crate::domain::{FuelEntry, Vehicle};

/// Snapshot of everything held in memory, for the full JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarageSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub vehicles: Vec<Vehicle>,
    pub fuel_entries: Vec<FuelEntry>,
}

/// Exporter writing the session's data out in CSV or JSON
pub struct Exporter<'a> {
    service: &'a GarageService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a GarageService) -> Self {
        Self { service }
    }

    /// Export vehicles to CSV format
    pub fn export_vehicles_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "model",
            "mileage",
            "oil_change_date",
            "tire_condition",
        ])?;

        let mut count = 0;
        for vehicle in self.service.vehicles() {
            csv_writer.write_record(&[
                vehicle.id.to_string(),
                vehicle.model.clone(),
                vehicle.mileage.to_string(),
                vehicle.oil_change_date.format("%Y-%m-%d").to_string(),
                vehicle.tire_condition.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        info!(count, "exported vehicles");
        Ok(count)
    }

    /// Export fuel entries to CSV format
    pub fn export_fuel_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "car_model", "fuel_quantity", "cost"])?;

        let mut count = 0;
        for entry in self.service.fuel_entries() {
            csv_writer.write_record(&[
                entry.id.to_string(),
                entry.date.to_rfc3339(),
                entry.car_model.clone(),
                entry.fuel_quantity.to_string(),
                entry.cost.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        info!(count, "exported fuel entries");
        Ok(count)
    }

    /// Export vehicles and fuel entries as a JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<GarageSnapshot> {
        let snapshot = GarageSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            vehicles: self.service.vehicles().to_vec(),
            fuel_entries: self.service.fuel_entries().to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        info!(
            vehicles = snapshot.vehicles.len(),
            fuel_entries = snapshot.fuel_entries.len(),
            "exported snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn service_with_data() -> GarageService {
        let mut service = GarageService::new();
        service.add_vehicle(Vehicle::new(
            "Civic, 2019",
            42_000,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            "good",
        ));
        service
            .record_fuel(FuelEntry::new(40.0, 65.5), "Civic, 2019")
            .unwrap();
        service
            .record_fuel(FuelEntry::new(30.0, 50.0), "Accord")
            .unwrap();
        service
    }

    #[test]
    fn test_export_vehicles_csv_quotes_fields() {
        let service = service_with_data();
        let mut buffer = Vec::new();

        let count = Exporter::new(&service)
            .export_vehicles_csv(&mut buffer)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(count, 1);
        assert!(output.starts_with("id,model,mileage,oil_change_date,tire_condition\n"));
        assert!(output.contains("\"Civic, 2019\",42000,2024-02-10,good"));
    }

    #[test]
    fn test_export_fuel_csv() {
        let service = service_with_data();
        let mut buffer = Vec::new();

        let count = Exporter::new(&service).export_fuel_csv(&mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(count, 2);
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains(",Accord,30,50\n"));
    }

    #[test]
    fn test_export_full_json() {
        let service = service_with_data();
        let mut buffer = Vec::new();

        let snapshot = Exporter::new(&service).export_full_json(&mut buffer).unwrap();

        assert_eq!(snapshot.vehicles.len(), 1);
        assert_eq!(snapshot.fuel_entries.len(), 2);

        let parsed: GarageSnapshot = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.fuel_entries, snapshot.fuel_entries);
        assert_eq!(parsed.vehicles, snapshot.vehicles);
    }
}
