//! Headless keypad session.
//!
//! Collects key presses into an equation and evaluates it on `Enter`,
//! keeping the last successful result. The key set is the keypad's own and
//! is independent of the evaluator's grammar.

use tracing::debug;

use crate::calculator::{CalcError, evaluate};

/// Keys that append their text to the equation.
pub const INPUT_KEYS: &[&str] = &[
    "7", "8", "9", "4", "5", "6", "1", "2", "3", "00", "0", "√", "%", "/", "*", "-", "+", ".",
    "(", ")",
];

/// A key the keypad reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Appends its text to the equation.
    Input(&'static str),
    /// Clears the equation and the result.
    Escape,
    /// Evaluates the equation.
    Enter,
}

impl Key {
    /// Look up a key by the name a keyboard event reports for it.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Escape" => Some(Self::Escape),
            "Enter" => Some(Self::Enter),
            _ => INPUT_KEYS
                .iter()
                .find(|&&key| key == name)
                .map(|&key| Self::Input(key)),
        }
    }
}

/// What a key press did.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    /// The key is not part of the keypad.
    Ignored,
    /// The key text was appended to the equation.
    Appended,
    /// Appending the key would exceed the input limit.
    Rejected,
    /// The equation and result were reset.
    Cleared,
    /// The equation evaluated to a new result.
    Evaluated(f64),
    /// Evaluation failed; the previous result is kept.
    Failed(CalcError),
}

/// Keypad state: the equation being typed and the last result.
#[derive(Clone, Debug)]
pub struct Keypad {
    equation: String,
    result: f64,
    max_input_len: usize,
}

impl Keypad {
    pub fn new(max_input_len: usize) -> Self {
        Self {
            equation: String::new(),
            result: 0.0,
            max_input_len,
        }
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    /// Handle a key press by name.
    pub fn press(&mut self, name: &str) -> KeyOutcome {
        match Key::from_name(name) {
            Some(key) => self.press_key(key),
            None => {
                debug!(key = name, "Ignoring key");
                KeyOutcome::Ignored
            }
        }
    }

    pub fn press_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Escape => {
                self.equation.clear();
                self.result = 0.0;
                KeyOutcome::Cleared
            }
            Key::Enter => self.calculate_equation(),
            Key::Input(text) => {
                let len = self.equation.chars().count() + text.chars().count();
                if len > self.max_input_len {
                    debug!(len, max = self.max_input_len, "Equation too long");
                    return KeyOutcome::Rejected;
                }
                self.equation.push_str(text);
                KeyOutcome::Appended
            }
        }
    }

    fn calculate_equation(&mut self) -> KeyOutcome {
        match evaluate(&self.equation) {
            Ok(value) => {
                self.result = value;
                KeyOutcome::Evaluated(value)
            }
            Err(err) => {
                debug!(equation = %self.equation, error = %err, "Evaluation failed");
                KeyOutcome::Failed(err)
            }
        }
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_INPUT_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(keypad: &mut Keypad, keys: &[&str]) {
        for key in keys {
            keypad.press(key);
        }
    }

    #[test]
    fn test_keys_build_equation() {
        let mut keypad = Keypad::default();
        type_keys(&mut keypad, &["(", "1", "00", "+", "2", ")", "*", "√", "4"]);
        assert_eq!(keypad.equation(), "(100+2)*√4");
    }

    #[test]
    fn test_enter_evaluates() {
        let mut keypad = Keypad::default();
        type_keys(&mut keypad, &["2", "+", "3", "*", "4"]);
        assert_eq!(keypad.press("Enter"), KeyOutcome::Evaluated(14.0));
        assert_eq!(keypad.result(), 14.0);
        assert_eq!(keypad.equation(), "2+3*4");
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut keypad = Keypad::default();
        type_keys(&mut keypad, &["9", "Enter", "+", "+"]);
        assert_eq!(keypad.result(), 9.0);

        assert_eq!(keypad.press("Enter"), KeyOutcome::Failed(CalcError::Syntax));
        assert_eq!(keypad.result(), 9.0);
    }

    #[test]
    fn test_typed_sign_fails() {
        let mut keypad = Keypad::default();
        type_keys(&mut keypad, &["2", "*", "-", "3"]);
        assert_eq!(keypad.press("Enter"), KeyOutcome::Failed(CalcError::Syntax));
        assert_eq!(keypad.result(), 0.0);
    }

    #[test]
    fn test_escape_clears() {
        let mut keypad = Keypad::default();
        type_keys(&mut keypad, &["7", "Enter"]);
        assert_eq!(keypad.press("Escape"), KeyOutcome::Cleared);
        assert_eq!(keypad.equation(), "");
        assert_eq!(keypad.result(), 0.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut keypad = Keypad::default();
        assert_eq!(keypad.press("a"), KeyOutcome::Ignored);
        assert_eq!(keypad.press("^"), KeyOutcome::Ignored);
        assert_eq!(keypad.press("Shift"), KeyOutcome::Ignored);
        assert_eq!(keypad.equation(), "");
    }

    #[test]
    fn test_input_limit() {
        let mut keypad = Keypad::new(3);
        type_keys(&mut keypad, &["1", "+"]);
        assert_eq!(keypad.press("00"), KeyOutcome::Rejected);
        assert_eq!(keypad.press("2"), KeyOutcome::Appended);
        assert_eq!(keypad.press("3"), KeyOutcome::Rejected);
        assert_eq!(keypad.equation(), "1+2");
    }
}
