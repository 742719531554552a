use clap::{Parser, Subcommand, ValueEnum};

/// One line typed into the shell
#[derive(Parser, Debug)]
#[command(name = "carledger", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Vehicle management commands
    #[command(subcommand)]
    Car(CarCommands),

    /// Fuel purchase commands
    #[command(subcommand)]
    Fuel(FuelCommands),

    /// Show fuel expenses and the spend for one month
    Expenses {
        /// Month to total (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV or JSON
    Export {
        /// What to export
        #[arg(value_enum)]
        target: ExportTarget,

        /// Output file (printed if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show or change the economy unit (mpg, kpl)
    Unit {
        unit: Option<String>,
    },

    /// Leave the session (all data is discarded)
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
pub enum CarCommands {
    /// Add a car
    Add {
        /// Car model (free text)
        model: String,

        /// Current odometer reading
        #[arg(short, long)]
        mileage: String,

        /// Date of the last oil change (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        oil_change: Option<String>,

        /// Tire condition (free text)
        #[arg(short, long, default_value = "")]
        tires: String,
    },

    /// List tracked cars
    List,

    /// Show details for one car
    Show {
        /// Row number from `car list`
        row: usize,
    },

    /// Edit a car
    Edit {
        /// Row number from `car list`
        row: usize,

        #[arg(long)]
        model: Option<String>,

        #[arg(short, long)]
        mileage: Option<String>,

        #[arg(long)]
        oil_change: Option<String>,

        #[arg(short, long)]
        tires: Option<String>,
    },

    /// Remove one or more cars
    Remove {
        /// Row numbers from `car list`
        #[arg(required = true)]
        rows: Vec<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FuelCommands {
    /// Record a fuel purchase
    Add {
        /// Car model this purchase is for
        #[arg(long)]
        car: String,

        /// Fuel quantity
        #[arg(short, long)]
        quantity: String,

        /// Total cost
        #[arg(short, long)]
        cost: String,

        /// Odometer reading at the pump (checked, not kept)
        #[arg(long)]
        odometer: Option<String>,

        /// Fuel price per unit (checked, not kept)
        #[arg(long)]
        price: Option<String>,

        /// Purchase date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List fuel purchases with their economy
    List {
        /// Economy unit for this listing: mpg or kpl
        #[arg(long)]
        unit: Option<String>,
    },

    /// Edit date, quantity or cost of a purchase
    Edit {
        /// Row number from `fuel list`
        row: usize,

        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        quantity: Option<String>,

        #[arg(short, long)]
        cost: Option<String>,
    },

    /// Remove one or more purchases
    Remove {
        /// Row numbers from `fuel list`
        #[arg(required = true)]
        rows: Vec<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Fuel spend per calendar month
    Monthly {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Vehicles,
    Fuel,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> Result<ShellLine, clap::Error> {
        ShellLine::try_parse_from(words)
    }

    #[test]
    fn test_parse_car_add() {
        let line = parse(&["car", "add", "Civic", "--mileage", "42000", "--tires", "good"]).unwrap();

        match line.command {
            ShellCommand::Car(CarCommands::Add {
                model,
                mileage,
                oil_change,
                tires,
            }) => {
                assert_eq!(model, "Civic");
                assert_eq!(mileage, "42000");
                assert!(oil_change.is_none());
                assert_eq!(tires, "good");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_fuel_remove_many() {
        let line = parse(&["fuel", "remove", "1", "3"]).unwrap();
        assert!(matches!(
            line.command,
            ShellCommand::Fuel(FuelCommands::Remove { ref rows }) if rows == &vec![1, 3]
        ));
    }

    #[test]
    fn test_remove_requires_rows() {
        assert!(parse(&["car", "remove"]).is_err());
    }

    #[test]
    fn test_exit_alias() {
        assert!(matches!(parse(&["exit"]).unwrap().command, ShellCommand::Quit));
    }

    #[test]
    fn test_report_format_default() {
        let line = parse(&["report", "monthly"]).unwrap();
        assert!(matches!(
            line.command,
            ShellCommand::Report(ReportCommands::Monthly {
                format: OutputFormat::Table
            })
        ));
    }

    #[test]
    fn test_command_definitions_are_consistent() {
        use clap::CommandFactory;
        ShellLine::command().debug_assert();
    }
}
