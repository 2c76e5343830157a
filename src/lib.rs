//! A keypad calculator that reduces arithmetic expressions by operator
//! precedence.
//!
//! The [`calculator`] module holds the evaluator core; [`keypad`] and
//! [`config`] are the shell around it used by the `zcalc` binary.

pub mod calculator;
pub mod config;
pub mod keypad;

pub use calculator::{CalcError, CalcResult, evaluate};
