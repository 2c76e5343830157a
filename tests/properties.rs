//! Property tests for the evaluator against a straightforward reference.

use proptest::prelude::*;
use zcalc::calculator::{CalcError, evaluate};

fn apply(op: char, a: f64, b: f64) -> f64 {
    match op {
        '*' => a * b,
        '/' => a / b,
        '%' => a % b,
        '+' => a + b,
        '-' => a - b,
        _ => unreachable!("unexpected operator {op}"),
    }
}

/// Left-associative evaluation with `% / *` binding tighter than `+ -`.
/// Returns `None` when any intermediate value is not finite.
fn reference(first: u32, rest: &[(char, u32)]) -> Option<f64> {
    let mut terms: Vec<(char, f64)> = vec![('+', f64::from(first))];
    for &(op, n) in rest {
        let n = f64::from(n);
        if matches!(op, '*' | '/' | '%') {
            let last = &mut terms.last_mut()?.1;
            *last = apply(op, *last, n);
            if !last.is_finite() {
                return None;
            }
        } else {
            terms.push((op, n));
        }
    }

    let mut acc = terms[0].1;
    for &(op, value) in &terms[1..] {
        acc = apply(op, acc, value);
    }
    Some(acc)
}

fn render(first: u32, rest: &[(char, u32)]) -> String {
    let mut expression = first.to_string();
    for (op, n) in rest {
        expression.push(*op);
        expression.push_str(&n.to_string());
    }
    expression
}

fn binary_op() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['%', '/', '*', '+', '-'])
}

fn medium_op() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['%', '/', '*'])
}

fn low_op() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['+', '-'])
}

proptest! {
    #[test]
    fn matches_reference_precedence(
        first in 0u32..1000,
        rest in prop::collection::vec((binary_op(), 0u32..1000), 0..6),
    ) {
        let expression = render(first, &rest);
        match reference(first, &rest) {
            Some(expected) => prop_assert_eq!(evaluate(&expression), Ok(expected)),
            None => prop_assert_eq!(evaluate(&expression), Err(CalcError::Syntax)),
        }
    }

    #[test]
    fn literal_round_trips(
        int_part in "[0-9]{1,10}",
        frac_part in prop::option::of("[0-9]{1,6}"),
    ) {
        let literal = match frac_part {
            Some(frac) => format!("{int_part}.{frac}"),
            None => int_part,
        };
        let expected: f64 = literal.parse().unwrap();
        prop_assert_eq!(evaluate(&literal), Ok(expected));
    }

    #[test]
    fn passes_run_high_medium_low(
        a in 1u32..1000,
        b in 1u32..1000,
        c in 1u32..1000,
        medium in medium_op(),
        low in low_op(),
        layout in 0usize..6,
    ) {
        let (fa, fb, fc) = (f64::from(a), f64::from(b), f64::from(c));
        let (expression, expected) = match layout {
            0 => (format!("√{a}{medium}{b}{low}{c}"), apply(low, apply(medium, fa.sqrt(), fb), fc)),
            1 => (format!("{a}{low}{b}{medium}√{c}"), apply(low, fa, apply(medium, fb, fc.sqrt()))),
            2 => (format!("{a}{medium}√{b}{low}{c}"), apply(low, apply(medium, fa, fb.sqrt()), fc)),
            3 => (format!("{a}{low}√{b}{medium}{c}"), apply(low, fa, apply(medium, fb.sqrt(), fc))),
            4 => (format!("√{a}{low}{b}{medium}{c}"), apply(low, fa.sqrt(), apply(medium, fb, fc))),
            _ => (format!("{a}{medium}{b}{low}√{c}"), apply(low, apply(medium, fa, fb), fc.sqrt())),
        };
        prop_assert_eq!(evaluate(&expression), Ok(expected), "expression: {}", expression);
    }

    #[test]
    fn parenthesized_literal_is_unchanged(n in 0u32..100_000, depth in 1usize..5) {
        let expression = format!("{}{}{}", "(".repeat(depth), n, ")".repeat(depth));
        prop_assert_eq!(evaluate(&expression), Ok(f64::from(n)));
    }
}

#[test]
fn documented_examples() {
    assert_eq!(evaluate("2+3"), Ok(5.0));
    assert_eq!(evaluate("2+3*4"), Ok(14.0));
    assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
    assert_eq!(evaluate("√9+1"), Ok(4.0));
    assert_eq!(evaluate("10%3"), Ok(1.0));
    assert_eq!(evaluate("((2+3)*(4-1))"), Ok(15.0));
    assert_eq!(evaluate("10/0"), Err(CalcError::Syntax));
    assert_eq!(evaluate("2++3"), Err(CalcError::Syntax));
    assert_eq!(evaluate("(2+3"), Err(CalcError::Syntax));
}
