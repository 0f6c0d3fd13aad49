use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use mods_report::export::generate_report;
use mods_report::{ReportError, Result};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging() {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    match generate_report(Path::new(&cli.instance_json)) {
        Ok(summary) => {
            println!("Excel report generated: {}", summary.output.display());
            ExitCode::SUCCESS
        }
        Err(ReportError::MissingInput(path)) => {
            println!("File not found: {}", path.display());
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate a Mods Excel report from an ATLauncher instance.json file."
)]
struct Cli {
    /// Path to instance.json. Taken as a raw OS string so an empty argument
    /// reaches the missing-file check instead of being rejected by the parser.
    #[arg(value_name = "INSTANCE_JSON")]
    instance_json: OsString,
}
