//! Pattern matching for reducible sub-expressions.
//!
//! Recognizes, inside an expression string, the next piece the evaluator can
//! reduce: a parenthesized group without nested parentheses, or a single
//! operator application of one priority class with numeric operands.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use super::operator::{Operator, Priority};

/// A numeric literal: digits with an optional fractional part.
const LITERAL: &str = r"[0-9]+(?:\.[0-9]+)?";

lazy_static! {
    /// Character class body matching any operator symbol.
    static ref OPERATOR_CLASS: String = symbol_class(Operator::ALL.into_iter());

    /// Matches `(` + digits, decimal points and operators + `)`.
    static ref PARENTHESIZED: Regex = Regex::new(&format!(
        r"\((?P<inner>[0-9.{}]+)\)",
        *OPERATOR_CLASS
    ))
    .unwrap();

    /// Matches `√` followed by a literal.
    static ref HIGH_PRIORITY: Regex = reduction_pattern(Priority::High);

    /// Matches `<literal><% / *><literal>`.
    static ref MEDIUM_PRIORITY: Regex = reduction_pattern(Priority::Medium);

    /// Matches `<literal><+ -><literal>`.
    static ref LOW_PRIORITY: Regex = reduction_pattern(Priority::Low);

    /// Matches a whole string holding one signed literal.
    static ref NUMBER: Regex = Regex::new(&format!("^-?{LITERAL}$")).unwrap();
}

/// A parenthesized group found in an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    /// Byte range of the group including both parentheses.
    pub outer: Range<usize>,
    /// Byte range of the interior.
    pub inner: Range<usize>,
}

fn symbol_class(operators: impl Iterator<Item = Operator>) -> String {
    operators
        .map(|op| regex::escape(&op.symbol().to_string()))
        .collect()
}

/// Build the recognizer for one priority class.
///
/// The match must start at the beginning of the string or right after an
/// operator, and must end at the end of the string or right before one, so a
/// literal is never split. Operands may carry a `-` sign because reductions
/// write negative intermediate results back into the string. Only the `expr`
/// group is the reducible sub-expression.
fn reduction_pattern(priority: Priority) -> Regex {
    let operators = symbol_class(priority.operators());
    let all = &*OPERATOR_CLASS;

    let unary = priority
        .operators()
        .all(|op| op.function().arity() == 1);
    let body = if unary {
        format!("[{operators}]-?{LITERAL}")
    } else {
        format!("-?{LITERAL}[{operators}]-?{LITERAL}")
    };

    Regex::new(&format!("(?:^|[{all}])(?P<expr>{body})(?:$|[{all}])")).unwrap()
}

fn pattern_for(priority: Priority) -> &'static Regex {
    match priority {
        Priority::High => &HIGH_PRIORITY,
        Priority::Medium => &MEDIUM_PRIORITY,
        Priority::Low => &LOW_PRIORITY,
    }
}

/// Find the leftmost reducible sub-expression of the given priority class.
pub fn find_reducible(expression: &str, priority: Priority) -> Option<Range<usize>> {
    pattern_for(priority)
        .captures(expression)
        .and_then(|caps| caps.name("expr"))
        .map(|m| m.range())
}

/// Find the leftmost parenthesized group whose interior has no parentheses.
pub fn find_group(expression: &str) -> Option<Group> {
    let caps = PARENTHESIZED.captures(expression)?;
    let outer = caps.get(0)?.range();
    let inner = caps.name("inner")?.range();
    Some(Group { outer, inner })
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Check whether the text at `range` touches a literal on either side,
/// as in `2(3)` or `(2)3`.
pub fn is_juxtaposed(expression: &str, range: &Range<usize>) -> bool {
    let before = expression[..range.start].chars().next_back();
    let after = expression[range.end..].chars().next();
    before.is_some_and(is_literal_char) || after.is_some_and(is_literal_char)
}

/// Locate the operator occurrences in a matched sub-expression.
///
/// A `-` directly followed by a digit is a sign, not an operator, when it
/// opens the string or follows another operator. Every other character that
/// is not part of a literal counts as an operator occurrence, known or not.
pub fn operator_positions(substr: &str) -> Vec<(usize, char)> {
    let mut positions = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = substr.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_literal_char(c) {
            let next_is_digit = chars.peek().is_some_and(|&(_, n)| n.is_ascii_digit());
            let after_operator = prev.is_none_or(|p| !is_literal_char(p));
            let is_sign = c == '-' && next_is_digit && after_operator;
            if !is_sign {
                positions.push((i, c));
            }
        }
        prev = Some(c);
    }

    positions
}

/// Parse a string holding exactly one, optionally negative, literal.
///
/// Returns `None` for anything else, including values that overflow to
/// infinity.
pub fn parse_literal(text: &str) -> Option<f64> {
    if !NUMBER.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
