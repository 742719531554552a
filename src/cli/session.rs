use std::fs::File;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

use crate::application::{AppError, GarageService};
use crate::config::Settings;
use crate::domain::{FuelEntry, FuelEntryUpdate, UnitMode, Vehicle, format_amount, format_economy};
use crate::io::Exporter;

use super::commands::{
    CarCommands, ExportTarget, FuelCommands, OutputFormat, ReportCommands, ShellCommand,
    ShellLine,
};
use super::parse::{
    parse_date, parse_entry_date, parse_mileage, parse_month, parse_number, parse_unit,
    row_to_offset, rows_to_offsets, split_args,
};

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session. All data lives in the session's
/// [`GarageService`] and is gone when the session ends.
pub struct Session {
    service: GarageService,
    settings: Settings,
    unit: UnitMode,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            service: GarageService::new(),
            unit: settings.unit,
            settings,
        }
    }

    pub fn service(&self) -> &GarageService {
        &self.service
    }

    /// Unit currently used for economy listings.
    pub fn unit(&self) -> UnitMode {
        self.unit
    }

    /// Read commands from `input` until EOF or `quit`. A failing command
    /// prints its error and the session carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W, prompt: bool) -> Result<()> {
        if prompt {
            writeln!(out, "CarLedger. Type 'help' for commands, 'quit' to leave.")?;
        }

        loop {
            if prompt {
                write!(out, "carledger> ")?;
                out.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line).context("Failed to read input")? == 0 {
                break;
            }

            match self.execute(&line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "Error: {:#}", e)?,
            }
        }

        Ok(())
    }

    /// Parse and run a single command line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = split_args(line)?;
        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Help output and usage errors are both reported inline
                if !matches!(e.kind(), ErrorKind::DisplayHelp) {
                    debug!(line, "unparseable command");
                }
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match parsed.command {
            ShellCommand::Car(cmd) => self.run_car_command(cmd, out)?,
            ShellCommand::Fuel(cmd) => self.run_fuel_command(cmd, out)?,
            ShellCommand::Expenses { month } => self.run_expenses_command(month.as_deref(), out)?,
            ShellCommand::Report(ReportCommands::Monthly { format }) => {
                self.run_monthly_report(format, out)?
            }
            ShellCommand::Export { target, output } => {
                self.run_export_command(target, output.as_deref(), out)?
            }
            ShellCommand::Unit { unit } => match unit {
                Some(unit) => {
                    self.unit = parse_unit(&unit)?;
                    writeln!(out, "Unit set to {} ({})", self.unit, self.unit.label())?;
                }
                None => writeln!(out, "Unit: {} ({})", self.unit, self.unit.label())?,
            },
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn run_car_command<W: Write>(&mut self, cmd: CarCommands, out: &mut W) -> Result<()> {
        match cmd {
            CarCommands::Add {
                model,
                mileage,
                oil_change,
                tires,
            } => {
                let mileage = parse_mileage(&mileage)?;
                let oil_change_date = match oil_change {
                    Some(date) => parse_date(&date)?,
                    None => Local::now().date_naive(),
                };

                let id = self
                    .service
                    .add_vehicle(Vehicle::new(model.clone(), mileage, oil_change_date, tires));
                writeln!(out, "Added car: {} ({})", model, id)?;
            }

            CarCommands::List => {
                let vehicles = self.service.vehicles();
                if vehicles.is_empty() {
                    writeln!(out, "No cars added yet.")?;
                } else {
                    writeln!(
                        out,
                        "{:<4} {:<20} {:>10}  {:<14} {}",
                        "#", "MODEL", "MILEAGE", "OIL CHANGE", "TIRES"
                    )?;
                    writeln!(out, "{}", "-".repeat(64))?;
                    for (i, vehicle) in vehicles.iter().enumerate() {
                        writeln!(
                            out,
                            "{:<4} {:<20} {:>10}  {:<14} {}",
                            i + 1,
                            vehicle.model,
                            vehicle.mileage,
                            vehicle.oil_change_date.format(&self.settings.date_format),
                            vehicle.tire_condition
                        )?;
                    }
                }
            }

            CarCommands::Show { row } => {
                let vehicle = self.vehicle_row(row)?;
                let entries: Vec<&FuelEntry> = self
                    .service
                    .fuel_entries()
                    .iter()
                    .filter(|e| e.car_model == vehicle.model)
                    .collect();
                let spent = entries.iter().fold(0.0, |sum, e| sum + e.cost);

                writeln!(out, "Car Model: {}", vehicle.model)?;
                writeln!(out, "  ID:                    {}", vehicle.id)?;
                writeln!(out, "  Mileage:               {}", vehicle.mileage)?;
                writeln!(
                    out,
                    "  Last Oil Change Date:  {}",
                    vehicle.oil_change_date.format(&self.settings.date_format)
                )?;
                writeln!(out, "  Tire Condition:        {}", vehicle.tire_condition)?;
                writeln!(
                    out,
                    "  Fuel entries:          {} ({} total)",
                    entries.len(),
                    self.settings.format_cost(spent)
                )?;
            }

            CarCommands::Edit {
                row,
                model,
                mileage,
                oil_change,
                tires,
            } => {
                let mut vehicle = self.vehicle_row(row)?.clone();

                if let Some(model) = model {
                    vehicle = vehicle.with_model(model);
                }
                if let Some(mileage) = mileage {
                    vehicle = vehicle.with_mileage(parse_mileage(&mileage)?);
                }
                if let Some(date) = oil_change {
                    vehicle = vehicle.with_oil_change_date(parse_date(&date)?);
                }
                if let Some(tires) = tires {
                    vehicle = vehicle.with_tire_condition(tires);
                }

                let model = vehicle.model.clone();
                if self.service.update_vehicle(vehicle) {
                    writeln!(out, "Updated car: {}", model)?;
                }
            }

            CarCommands::Remove { rows } => {
                let offsets = rows_to_offsets("car", &rows)?;
                let removed = self.service.remove_vehicles_at(&offsets);
                writeln!(out, "Removed {} car(s)", removed)?;
            }
        }
        Ok(())
    }

    fn run_fuel_command<W: Write>(&mut self, cmd: FuelCommands, out: &mut W) -> Result<()> {
        match cmd {
            FuelCommands::Add {
                car,
                quantity,
                cost,
                odometer,
                price,
                date,
            } => {
                let quantity = parse_number("quantity", &quantity)?;
                let cost = parse_number("cost", &cost)?;
                // Checked like the rest of the form, then discarded
                if let Some(odometer) = odometer {
                    parse_number("odometer", &odometer)?;
                }
                if let Some(price) = price {
                    parse_number("price", &price)?;
                }

                let mut entry = FuelEntry::new(quantity, cost);
                if let Some(date) = date {
                    entry = entry.with_date(parse_entry_date(&date)?);
                }

                let id = self.service.record_fuel(entry, &car)?;
                writeln!(
                    out,
                    "Recorded fuel entry for {}: {} {}, {} ({})",
                    car,
                    format_amount(quantity),
                    self.settings.volume_label,
                    self.settings.format_cost(cost),
                    id
                )?;
            }

            FuelCommands::List { unit } => {
                let unit = match unit {
                    Some(unit) => parse_unit(&unit)?,
                    None => self.unit,
                };

                let rows = self.service.fuel_log(unit);
                if rows.is_empty() {
                    writeln!(out, "No fuel entries added yet.")?;
                    return Ok(());
                }

                writeln!(
                    out,
                    "{:<4} {:<14} {:<20} {:>12} {:>10} {:>10}",
                    "#", "DATE", "CAR MODEL", "QUANTITY", "COST", "MILEAGE"
                )?;
                writeln!(out, "{}", "-".repeat(75))?;
                for (i, row) in rows.iter().enumerate() {
                    writeln!(
                        out,
                        "{:<4} {:<14} {:<20} {:>12} {:>10} {:>10}",
                        i + 1,
                        self.format_entry_date(&row.entry.date),
                        row.entry.car_model,
                        format_amount(row.entry.fuel_quantity),
                        self.settings.format_cost(row.entry.cost),
                        format_economy(row.economy)
                    )?;
                }
                writeln!(out, "Mileage in {}", unit.label())?;
            }

            FuelCommands::Edit {
                row,
                date,
                quantity,
                cost,
            } => {
                let id = self.fuel_row(row)?.id;

                let mut update = FuelEntryUpdate::new();
                if let Some(date) = date {
                    update = update.date(parse_entry_date(&date)?);
                }
                if let Some(quantity) = quantity {
                    update = update.fuel_quantity(parse_number("quantity", &quantity)?);
                }
                if let Some(cost) = cost {
                    update = update.cost(parse_number("cost", &cost)?);
                }

                if update.is_empty() {
                    writeln!(out, "Nothing to change")?;
                } else if self.service.update_fuel_entry(id, update) {
                    writeln!(out, "Updated fuel entry {}", row)?;
                }
            }

            FuelCommands::Remove { rows } => {
                let offsets = rows_to_offsets("fuel entry", &rows)?;
                let removed = self.service.remove_fuel_entries_at(&offsets);
                writeln!(out, "Removed {} fuel entr{}", removed, if removed == 1 { "y" } else { "ies" })?;
            }
        }
        Ok(())
    }

    fn run_expenses_command<W: Write>(&self, month: Option<&str>, out: &mut W) -> Result<()> {
        let reference = match month {
            Some(month) => parse_month(month)?,
            None => Local::now(),
        };
        let report = self.service.expense_report(&reference);

        if report.rows.is_empty() {
            writeln!(out, "No fuel entries added yet.")?;
        } else {
            writeln!(
                out,
                "{:<4} {:<14} {:<20} {:>12} {:>10} {:>10}",
                "#", "DATE", "CAR MODEL", "QUANTITY", "COST", "MILEAGE"
            )?;
            writeln!(out, "{}", "-".repeat(75))?;
            for (i, row) in report.rows.iter().enumerate() {
                writeln!(
                    out,
                    "{:<4} {:<14} {:<20} {:>12} {:>10} {:>10}",
                    i + 1,
                    self.format_entry_date(&row.entry.date),
                    row.entry.car_model,
                    format_amount(row.entry.fuel_quantity),
                    self.settings.format_cost(row.entry.cost),
                    row.mileage
                )?;
            }
        }

        writeln!(
            out,
            "Monthly Expenses ({:04}-{:02}): {}",
            report.year,
            report.month,
            self.settings.format_cost(report.monthly_total)
        )?;
        Ok(())
    }

    fn run_monthly_report<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<()> {
        let report = self.service.monthly_report(&Local);

        match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            }
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(&mut *out);
                csv_writer.write_record(["month", "entries", "total"])?;
                for month in &report.months {
                    csv_writer.write_record(&[
                        month.label(),
                        month.count.to_string(),
                        month.total.to_string(),
                    ])?;
                }
                csv_writer.flush()?;
            }
            OutputFormat::Table => {
                writeln!(out, "Monthly Fuel Spend")?;
                writeln!(out)?;
                writeln!(out, "{:<10} {:>8} {:>14}", "MONTH", "ENTRIES", "TOTAL")?;
                writeln!(out, "{}", "-".repeat(34))?;
                for month in &report.months {
                    writeln!(
                        out,
                        "{:<10} {:>8} {:>14}",
                        month.label(),
                        month.count,
                        self.settings.format_cost(month.total)
                    )?;
                }
                writeln!(out, "{}", "-".repeat(34))?;
                writeln!(
                    out,
                    "{:<10} {:>8} {:>14}",
                    "TOTAL",
                    report.entry_count,
                    self.settings.format_cost(report.total)
                )?;
            }
        }
        Ok(())
    }

    fn run_export_command<W: Write>(
        &self,
        target: ExportTarget,
        output: Option<&str>,
        out: &mut W,
    ) -> Result<()> {
        match output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path))?;
                let summary = self.export_to(target, file)?;
                writeln!(out, "Exported {} to {}", summary, path)?;
            }
            None => {
                self.export_to(target, &mut *out)?;
                if target == ExportTarget::Full {
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    fn export_to<W: Write>(&self, target: ExportTarget, writer: W) -> Result<String> {
        let exporter = Exporter::new(&self.service);
        let summary = match target {
            ExportTarget::Vehicles => {
                format!("{} cars", exporter.export_vehicles_csv(writer)?)
            }
            ExportTarget::Fuel => {
                format!("{} fuel entries", exporter.export_fuel_csv(writer)?)
            }
            ExportTarget::Full => {
                let snapshot = exporter.export_full_json(writer)?;
                format!(
                    "{} cars and {} fuel entries",
                    snapshot.vehicles.len(),
                    snapshot.fuel_entries.len()
                )
            }
        };
        Ok(summary)
    }

    fn vehicle_row(&self, row: usize) -> Result<&Vehicle, AppError> {
        let index = row_to_offset("car", row)?;
        self.service
            .vehicle_at(index)
            .ok_or(AppError::RowNotFound { kind: "car", row })
    }

    fn fuel_row(&self, row: usize) -> Result<&FuelEntry, AppError> {
        let index = row_to_offset("fuel entry", row)?;
        self.service
            .fuel_entry_at(index)
            .ok_or(AppError::RowNotFound {
                kind: "fuel entry",
                row,
            })
    }

    fn format_entry_date(&self, date: &DateTime<Utc>) -> String {
        date.with_timezone(&Local)
            .format(&self.settings.date_format)
            .to_string()
    }
}
