/// Interactive selection of the simulation mode
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::simulation::RunPlan;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid option '{0}'")]
    InvalidOption(String),
    #[error("invalid {field} '{value}', expected a whole number")]
    InvalidNumber { field: &'static str, value: String },
}

/// What the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    QuickTest,
    Timed(RunPlan),
}

/// Print the options and read the operator's choice
pub fn prompt_mode<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Mode, MenuError> {
    writeln!(output, "\nOptions:")?;
    writeln!(output, "1. Quick test (one reading per room)")?;
    writeln!(output, "2. Short simulation (5 minutes)")?;
    writeln!(output, "3. Extended simulation (30 minutes)")?;
    writeln!(output, "4. Custom")?;

    let choice = ask(input, output, "\nSelect option (1-4): ")?;
    match choice.as_str() {
        "1" => Ok(Mode::QuickTest),
        "2" => Ok(Mode::Timed(RunPlan::minutes(5, 10))),
        "3" => Ok(Mode::Timed(RunPlan::minutes(30, 30))),
        "4" => {
            let duration = ask_number(input, output, "Duration (minutes): ", "duration")?;
            let interval = ask_number(input, output, "Interval (seconds): ", "interval")?;
            Ok(Mode::Timed(RunPlan::minutes(duration, interval)))
        }
        other => Err(MenuError::InvalidOption(other.to_string())),
    }
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String, MenuError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
) -> Result<u64, MenuError> {
    let value = ask(input, output, prompt)?;
    value
        .parse::<u64>()
        .map_err(|_| MenuError::InvalidNumber { field, value })
}
