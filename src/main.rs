use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{
    CalcResult, evaluate_expression, format_display, format_raw, is_accepted_input,
};
use zcalc::config::Config;
use zcalc::keypad::{KeyOutcome, Keypad};

#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about = "Evaluate keypad arithmetic: digits, . ( ) √ % / * + -")]
struct Cli {
    /// Expressions to evaluate. Reads one expression per line from stdin when omitted.
    expressions: Vec<String>,

    /// Read key names (`7`, `00`, `+`, `Enter`, `Escape`, ...) from stdin, one per line.
    #[arg(long, conflicts_with = "expressions")]
    keys: bool,

    /// Print each result as JSON.
    #[arg(long, conflicts_with = "raw")]
    json: bool,

    /// Print raw numbers without thousand separators.
    #[arg(long)]
    raw: bool,

    /// Path to a config file (defaults to `$XDG_CONFIG_HOME/zcalc/config.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    Display,
    Raw,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.log_level);

    let output = if cli.json {
        Output::Json
    } else if cli.raw {
        Output::Raw
    } else {
        Output::Display
    };

    let failures = if cli.keys {
        run_keypad(&config, output)?
    } else if cli.expressions.is_empty() {
        let mut failures = 0;
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            if !run_expression(&line, &config, output)? {
                failures += 1;
            }
        }
        failures
    } else {
        let mut failures = 0;
        for expression in &cli.expressions {
            if !run_expression(expression, &config, output)? {
                failures += 1;
            }
        }
        failures
    };

    if failures > 0 {
        bail!("{} expression(s) could not be evaluated", failures);
    }
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Check input before it reaches the evaluator.
fn check_input(input: &str, config: &Config) -> Result<()> {
    let len = input.trim().chars().count();
    if len > config.max_input_len {
        bail!(
            "equation too long: {} characters, limit is {}",
            len,
            config.max_input_len
        );
    }
    if !is_accepted_input(input) {
        bail!("equation contains characters outside 0-9 . ( ) √ % / * + -");
    }
    Ok(())
}

/// Evaluate one expression and print it. Returns whether it succeeded.
fn run_expression(input: &str, config: &Config, output: Output) -> Result<bool> {
    let result = match check_input(input, config) {
        Ok(()) => evaluate_expression(input, &config.format),
        Err(err) => CalcResult::Error {
            expression: input.trim().to_string(),
            message: err.to_string(),
        },
    };

    print_result(&result, output)?;
    Ok(result.is_success())
}

fn print_result(result: &CalcResult, output: Output) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match output {
        Output::Json => {
            let json = serde_json::to_string(result).context("Failed to serialize result")?;
            writeln!(stdout, "{}", json)?;
        }
        Output::Raw | Output::Display => match result {
            CalcResult::Success { .. } => {
                let text = if output == Output::Raw {
                    result.raw().unwrap_or_default()
                } else {
                    result.display()
                };
                writeln!(stdout, "{}", text)?;
            }
            CalcResult::Error {
                expression,
                message,
            } => {
                error!(%expression, "{}", message);
            }
        },
    }
    Ok(())
}

/// Drive a keypad session from key names on stdin. Returns the number of
/// failed evaluations.
fn run_keypad(config: &Config, output: Output) -> Result<usize> {
    let mut keypad = Keypad::new(config.max_input_len);
    let mut failures = 0;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        match keypad.press(name) {
            KeyOutcome::Evaluated(value) => {
                let result = CalcResult::Success {
                    expression: keypad.equation().to_string(),
                    value,
                    display_result: format_display(value, &config.format),
                    raw_result: format_raw(value, config.format.precision),
                };
                print_result(&result, output)?;
            }
            KeyOutcome::Failed(err) => {
                failures += 1;
                let result = CalcResult::Error {
                    expression: keypad.equation().to_string(),
                    message: err.to_string(),
                };
                print_result(&result, output)?;
            }
            KeyOutcome::Rejected => {
                warn!(key = name, "Key ignored, equation is at its length limit");
            }
            KeyOutcome::Ignored => {
                warn!(key = name, "Unknown key");
            }
            KeyOutcome::Appended | KeyOutcome::Cleared => {}
        }
    }

    Ok(failures)
}
