mod commands;
mod parse;
mod session;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

pub use commands::*;
pub use parse::*;
pub use session::*;

/// CarLedger - vehicle maintenance and fuel expense tracker
#[derive(Parser)]
#[command(name = "carledger")]
#[command(about = "Track cars, fuel purchases and monthly fuel spend for one session")]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, env = "CARLEDGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Economy unit: mpg or kpl (overrides the settings file)
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_tracing(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Load settings, then read commands from stdin until EOF or `quit`.
    pub fn run(self) -> Result<()> {
        let mut settings = Settings::load_or_default(self.config.as_deref())?;
        if let Some(unit) = &self.unit {
            settings.unit = parse_unit(unit)?;
        }

        info!(unit = %settings.unit, "session started");
        let mut session = Session::new(settings);

        let stdin = std::io::stdin();
        let interactive = stdin.is_terminal();
        let mut stdout = std::io::stdout().lock();
        session.run(stdin.lock(), &mut stdout, interactive)?;

        info!(
            vehicles = session.service().vehicles().len(),
            fuel_entries = session.service().fuel_entries().len(),
            "session ended, discarding data"
        );
        Ok(())
    }
}
