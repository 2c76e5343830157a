//! Evaluation results and their formatting.
//!
//! Turns user input into a [`CalcResult`] carrying the value in both
//! display and raw form, or the error message.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::detection::normalize_input;
use super::evaluation::evaluate;

/// How results are rendered for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Group the integer part in thousands with `,`.
    pub thousands_separator: bool,
    /// Maximum number of decimal places shown.
    pub precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            thousands_separator: true,
            precision: 10,
        }
    }
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalcResult {
    /// The equation reduced to a finite number.
    Success {
        /// Input as typed, trimmed.
        expression: String,
        value: f64,
        /// Value formatted with [`FormatOptions`].
        display_result: String,
        /// Value without separators, as printed by `--raw`.
        raw_result: String,
    },
    /// The equation was rejected.
    Error {
        /// Input as typed, trimmed.
        expression: String,
        /// Message of the [`CalcError`](super::CalcError).
        message: String,
    },
}

impl CalcResult {
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Formatted value, or the error message.
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Unseparated value; `None` for errors.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Success { raw_result, .. } => Some(raw_result),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate user input and format the outcome.
///
/// Whitespace around operators and parentheses is ignored. Failures are
/// returned as [`CalcResult::Error`].
pub fn evaluate_expression(input: &str, options: &FormatOptions) -> CalcResult {
    let expression = input.trim().to_string();

    match normalize_input(&expression).and_then(|equation| evaluate(&equation)) {
        Ok(value) => CalcResult::Success {
            display_result: format_display(value, options),
            raw_result: format_raw(value, options.precision),
            expression,
            value,
        },
        Err(err) => {
            debug!(%expression, error = %err, "Evaluation failed");
            CalcResult::Error {
                expression,
                message: err.to_string(),
            }
        }
    }
}

/// Format a number for display, optionally with thousand separators.
pub fn format_display(value: f64, options: &FormatOptions) -> String {
    let raw = format_raw(value, options.precision);
    if !options.thousands_separator {
        return raw;
    }

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, dec_part) = unsigned.split_at(unsigned.find('.').unwrap_or(unsigned.len()));

    format!("{}{}{}", sign, format_with_separators(int_part), dec_part)
}

/// Group a string of digits in thousands.
fn format_with_separators(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Format a number without separators.
pub fn format_raw(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        // `as i64` also folds -0 into 0
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.*}", precision, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
