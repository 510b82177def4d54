//! Cytoscatter command-line interface.
//!
//! Build, calibrate, and invert side-scatter calibration tables:
//! ```sh
//! cytoscatter table job.toml -o table.csv
//! cytoscatter calibrate job.toml --table table.csv -o calibrated.csv
//! cytoscatter invert calibrated.csv 1.2e4 3.4e3
//! cytoscatter validate job.toml
//! ```

mod config;
mod provider;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cytoscatter")]
#[command(about = "Side-scatter prediction and Mie-transform particle sizing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep a diameter series into a gain-1 calibration table.
    Table {
        /// Path to the job configuration file.
        job: PathBuf,
        /// Output CSV path.
        #[arg(short, long, default_value = "table.csv")]
        output: PathBuf,
        /// Also write the table as JSON next to the CSV.
        #[arg(long)]
        json: bool,
    },
    /// Solve the detector gain from the job's reference measurement and
    /// rescale an existing table.
    Calibrate {
        /// Path to the job configuration file.
        job: PathBuf,
        /// Gain-1 table produced by `table`.
        #[arg(short, long)]
        table: PathBuf,
        /// Output CSV path for the calibrated table.
        #[arg(short, long, default_value = "calibrated.csv")]
        output: PathBuf,
    },
    /// Map observed signals to diameters through a calibrated table.
    Invert {
        /// Calibrated table CSV.
        table: PathBuf,
        /// Observed signal values (negative values clamp to zero).
        #[arg(required = true)]
        signals: Vec<f64>,
    },
    /// Parse a job file without running anything.
    Validate {
        /// Path to the job configuration file.
        job: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Table { job, output, json } => {
            let job = config::load_config(&job)?;
            let table = runner::run_table(&job)?;
            runner::write_table_csv(&table, &output, 1.0)?;
            println!("Wrote {} entries to {}", table.entries().len(), output.display());
            if json {
                let json_path = output.with_extension("json");
                runner::write_table_json(&table, &json_path)?;
                println!("Wrote {}", json_path.display());
            }
            Ok(())
        }
        Commands::Calibrate { job, table, output } => {
            let job = config::load_config(&job)?;
            let gain1 = runner::read_table_csv(&table)?;
            let (gain, calibrated) = runner::run_calibrate(&job, &gain1)?;
            runner::write_table_csv(&calibrated, &output, gain)?;
            println!("Solved gain: {gain:.6e}");
            println!("Wrote calibrated table to {}", output.display());
            Ok(())
        }
        Commands::Invert { table, signals } => {
            let table = runner::read_table_csv(&table)?;
            runner::run_invert(&table, &signals);
            Ok(())
        }
        Commands::Validate { job } => {
            let _parsed = config::load_config(&job)?;
            println!("Configuration is valid: {}", job.display());
            Ok(())
        }
    }
}
