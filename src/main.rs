mod grader;
mod input;
mod logging;
mod model;
mod registers;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use crate::grader::{GradeReport, evaluate, explain};
use crate::input::{InputError, STDIN_MARKER, load_payload, origin_name, read_payload_text};
use crate::registers::{GradingCycle, RegisterError};

#[derive(Debug, Parser)]
#[command(
    name = "prediction-grader",
    version,
    about = "Grade object-detection service responses against the confidence threshold"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. info, debug).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Print 1 when any prediction scores above the threshold, else 0.
    Grade {
        /// Payload files; `-` reads stdin.
        #[arg(default_value = STDIN_MARKER)]
        inputs: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Replay a recorded service response through the register grading cycle.
    Registers {
        #[arg(default_value = STDIN_MARKER)]
        input: PathBuf,
        /// First holding register of the status/fault/grade block.
        #[arg(long, default_value_t = 0)]
        base: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Registers(#[from] RegisterError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct SourcedReport<'a> {
    source: String,
    #[serde(flatten)]
    report: &'a GradeReport,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    run_with(command, &mut stdout.lock())
}

fn run_with<W: Write>(command: Command, out: &mut W) -> Result<(), AppError> {
    match command {
        Command::Grade { inputs, format } => {
            for source in &inputs {
                let payload = load_payload(source)?;
                let line = match format {
                    OutputFormat::Text => evaluate(&payload).to_string(),
                    OutputFormat::Json => {
                        let report = explain(&payload);
                        render_report(&origin_name(source), &report)?
                    }
                };
                tracing::info!(source = %origin_name(source), "graded");
                writeln!(out, "{line}")?;
            }
        }
        Command::Registers { input, base } => {
            let body = read_payload_text(&input)?;
            let cycle = replay_cycle(&body);
            for (addr, value) in cycle.registers().addressed(base)? {
                writeln!(out, "{addr} {value}")?;
            }
        }
    }
    Ok(())
}

fn render_report(source: &str, report: &GradeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SourcedReport {
        source: source.to_string(),
        report,
    })
}

fn replay_cycle(body: &str) -> GradingCycle {
    let mut cycle = GradingCycle::new();
    cycle.begin_sourcing();
    cycle.requested();
    cycle.responded();
    cycle.grade_response(body);
    tracing::debug!(stage = ?cycle.stage(), fault = ?cycle.fault(), "cycle replayed");
    cycle
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
