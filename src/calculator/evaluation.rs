//! Expression evaluation by repeated reduction.
//!
//! Parenthesized groups are resolved innermost first, each interior being
//! evaluated on its own. The flat string that remains is then reduced one
//! priority class at a time, High → Medium → Low, replacing every matched
//! sub-expression with the text of its value until a single number is left.

use tracing::{debug, trace};

use super::detection::validate_equation;
use super::error::{CalcError, EvalResult};
use super::matcher::{self, find_group, find_reducible, is_juxtaposed, operator_positions};
use super::operator::{Function, Operator, Priority};

/// Evaluate an equation to a finite number.
///
/// This is the single entry point of the calculator core. Any failure
/// aborts the whole evaluation; no partial result is returned.
pub fn evaluate(equation: &str) -> EvalResult<f64> {
    validate_equation(equation)?;
    let flat = resolve_parentheses(equation)?;
    let value = calculate_expression(&flat)?;
    debug!(equation, value, "Evaluated equation");
    Ok(value)
}

/// Replace every parenthesized group with the value of its interior.
pub fn resolve_parentheses(expression: &str) -> EvalResult<String> {
    let mut expression = expression.to_string();

    while let Some(group) = find_group(&expression) {
        if is_juxtaposed(&expression, &group.outer) {
            debug!(%expression, "Parenthesized group touches a literal");
            return Err(CalcError::Syntax);
        }

        let value = calculate_expression(&expression[group.inner.clone()])?;
        expression.replace_range(group.outer, &render(value));
        trace!(%expression, "Resolved parenthesized group");
    }

    Ok(expression)
}

/// Reduce a parenthesis-free expression to its value.
pub fn calculate_expression(expression: &str) -> EvalResult<f64> {
    let mut expression = expression.to_string();

    for priority in Priority::PASSES {
        perform_reduction(&mut expression, priority)?;
    }

    // Whatever is left must be a single number.
    matcher::parse_literal(&expression).ok_or_else(|| {
        debug!(%expression, "Residual expression is not a number");
        CalcError::Syntax
    })
}

/// Run one priority pass until its pattern no longer matches.
fn perform_reduction(expression: &mut String, priority: Priority) -> EvalResult<()> {
    while let Some(range) = find_reducible(expression, priority) {
        let value = perform_calculation(&expression[range.clone()])?;
        expression.replace_range(range, &render(value));
        trace!(?priority, %expression, "Reduced sub-expression");
    }
    Ok(())
}

/// Apply the single operator of a matched sub-expression to its operands.
///
/// Non-finite results (division by zero, square root of a negative number,
/// overflow) are reported as syntax errors.
pub fn perform_calculation(substr: &str) -> EvalResult<f64> {
    let positions = operator_positions(substr);
    let &[(position, symbol)] = positions.as_slice() else {
        debug!(substr, count = positions.len(), "Expected exactly one operator");
        return Err(CalcError::Syntax);
    };

    let operator = Operator::from_symbol(symbol)
        .ok_or_else(|| CalcError::UnsupportedOperation(symbol.to_string()))?;

    let operands = [&substr[..position], &substr[position + symbol.len_utf8()..]]
        .into_iter()
        .filter(|operand| !operand.is_empty())
        .map(|operand| matcher::parse_literal(operand).ok_or(CalcError::Syntax))
        .collect::<EvalResult<Vec<f64>>>()?;

    let value = match (operator.function(), operands.as_slice()) {
        (Function::Unary(f), &[x]) => f(x),
        (Function::Binary(f), &[a, b]) => f(a, b),
        (function, _) => {
            debug!(
                substr,
                expected = function.arity(),
                found = operands.len(),
                "Operand count does not match operator"
            );
            return Err(CalcError::Syntax);
        }
    };

    if !value.is_finite() {
        debug!(substr, value, "Calculation produced a non-finite value");
        return Err(CalcError::Syntax);
    }

    Ok(value)
}

/// Write a value back as text the matcher can read again.
///
/// `f64`'s `Display` never uses exponent notation, so the output is always
/// a plain literal.
fn render(value: f64) -> String {
    value.to_string()
}
