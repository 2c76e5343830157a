//! Error types for expression evaluation.

use thiserror::Error;

/// Errors that can occur while evaluating an equation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// The equation does not reduce to a single finite number.
    #[error("equation syntax incorrect")]
    Syntax,

    /// A matched operator symbol has no entry in the operator table.
    #[error("equation contains unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, CalcError>;
