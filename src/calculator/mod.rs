//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Check that user input stays within the calculator alphabet
//! - Evaluate expressions by precedence-ordered reduction
//! - Format results for display

mod detection;
mod error;
mod evaluation;
mod matcher;
mod operator;
mod result;

pub use detection::{is_accepted_input, normalize_input, validate_equation};
pub use error::{CalcError, EvalResult};
pub use evaluation::{evaluate, perform_calculation};
pub use operator::{Function, Operator, Priority};
pub use result::{CalcResult, FormatOptions, evaluate_expression, format_display, format_raw};
