// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use carledger::application::GarageService;
use carledger::cli::Session;
use carledger::config::Settings;
use carledger::domain::{FuelEntry, Vehicle};
use chrono::{DateTime, NaiveDate, Utc};

/// Helper to parse a date string into DateTime<Utc> at noon
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
}

pub fn vehicle(model: &str) -> Vehicle {
    Vehicle::new(
        model,
        42_000,
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        "good",
    )
}

pub fn entry_on(date_str: &str, fuel_quantity: f64, cost: f64) -> FuelEntry {
    FuelEntry::new(fuel_quantity, cost).with_date(parse_date(date_str))
}

/// Test fixture: a garage with two cars and a few purchases
pub struct StandardGarage;

impl StandardGarage {
    /// Civic and Accord, plus purchases for Civic (x2), Accord and an
    /// untracked Golf, spread over March and April 2024
    pub fn create() -> Result<GarageService> {
        let mut service = GarageService::new();
        service.add_vehicle(vehicle("Civic"));
        service.add_vehicle(vehicle("Accord"));

        service.record_fuel(entry_on("2024-03-05", 10.0, 50.0), "Civic")?;
        service.record_fuel(entry_on("2024-03-20", 12.0, 30.0), "Accord")?;
        service.record_fuel(entry_on("2024-04-01", 40.0, 99.0), "Civic")?;
        service.record_fuel(entry_on("2024-03-28", 8.0, 20.0), "Golf")?;
        Ok(service)
    }
}

/// Run shell lines through a fresh session and return everything printed
pub fn run_session(lines: &[&str]) -> String {
    run_session_with(Settings::default(), lines).1
}

pub fn run_session_with(settings: Settings, lines: &[&str]) -> (Session, String) {
    let mut session = Session::new(settings);
    let input = lines.join("\n");
    let mut output = Vec::new();
    session
        .run(input.as_bytes(), &mut output, false)
        .expect("session should not fail");
    (session, String::from_utf8(output).unwrap())
}
