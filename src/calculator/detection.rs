//! Input checks for the calculator.
//!
//! Decides whether user input stays within the calculator's alphabet and
//! turns it into the flat equation string the evaluator reduces.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::error::{CalcError, EvalResult};
use super::operator::Operator;

lazy_static! {
    /// Matches strings built only from the accepted alphabet.
    /// Allows: digits, decimal point, parentheses, `√ % / * + -`, whitespace.
    static ref ACCEPTED_CHARS: Regex = Regex::new(
        r"^[0-9\s\.()√%/*+\-]+$"
    ).unwrap();

    /// Whitespace separating two literals, as in `9 9`.
    static ref SPLIT_LITERAL: Regex = Regex::new(r"[0-9.]\s+[0-9.]").unwrap();
}

/// Check if input only uses characters the evaluator understands.
pub fn is_accepted_input(input: &str) -> bool {
    ACCEPTED_CHARS.is_match(input.trim())
}

/// Remove whitespace around operators and parentheses.
///
/// Whitespace between two literals would join them into one number, so it
/// is a syntax error instead.
pub fn normalize_input(input: &str) -> EvalResult<String> {
    if SPLIT_LITERAL.is_match(input) {
        debug!(input, "Whitespace separates two literals");
        return Err(CalcError::Syntax);
    }
    Ok(input.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Check a typed equation before reduction.
///
/// Every character must be a digit, a decimal point, a parenthesis or an
/// operator, and `-` must follow a digit or `)`. Signed operands only ever
/// come from reductions writing negative results back.
pub fn validate_equation(equation: &str) -> EvalResult<()> {
    let mut prev: Option<char> = None;

    for c in equation.chars() {
        match Operator::from_symbol(c) {
            Some(Operator::Minus) => {
                if !prev.is_some_and(|p| p.is_ascii_digit() || p == ')') {
                    debug!(equation, "Minus without a left operand");
                    return Err(CalcError::Syntax);
                }
            }
            Some(_) => {}
            None if c.is_ascii_digit() || matches!(c, '.' | '(' | ')') => {}
            None => {
                debug!(equation, character = %c, "Character outside the alphabet");
                return Err(CalcError::Syntax);
            }
        }
        prev = Some(c);
    }

    Ok(())
}
