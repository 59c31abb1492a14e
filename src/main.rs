use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::info;

use prediction_sanity::exit_codes::{exit_code, EXIT_ERROR, EXIT_SUCCESS};
use prediction_sanity::{Report, SanityError, UnitValueParser, Validator};

#[derive(Parser)]
#[command(name = "sanity-check")]
#[command(about = "Run sanity check on a prediction CSV file")]
#[command(version)]
#[command(after_help = "\
Example:
  sanity-check --test_filename sample_test.csv --output_filename sample_test_out.csv")]
struct Cli {
    /// The test CSV file name
    #[arg(long = "test_filename", env = "SANITY_TEST_FILENAME", value_name = "PATH")]
    test_filename: PathBuf,

    /// The output CSV file name to check
    #[arg(long = "output_filename", env = "SANITY_OUTPUT_FILENAME", value_name = "PATH")]
    output_filename: PathBuf,
}

fn run(cli: &Cli) -> anyhow::Result<Report> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = Validator::new(UnitValueParser).run(&cli.test_filename, &cli.output_filename, &mut out)?;
    out.flush().context("flushing report to stdout")?;
    Ok(report)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            info!(
                "{}: {} test rows, {} output rows, {} missing, {} extra",
                report.output_path.display(),
                report.test_rows,
                report.output_rows,
                report.reconciliation.missing.len(),
                report.reconciliation.extra.len()
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(err) => {
            println!("Error: {err}");
            let code = err
                .downcast_ref::<SanityError>()
                .map_or(EXIT_ERROR, exit_code);
            ExitCode::from(code)
        }
    }
}
