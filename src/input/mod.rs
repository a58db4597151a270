//! Discrete input events and their keyboard bindings.

use crate::core::{Digit, Evaluator, Operator};
use serde::{Deserialize, Serialize};

/// One keypad event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Key {
    Digit(Digit),
    DecimalPoint,
    ToggleSign,
    Percent,
    Operator(Operator),
    Evaluate,
    ClearAll,
    ClearEntry,
}

impl Key {
    /// Map a keyboard key name to an event.
    ///
    /// Besides the printable keys, `Enter` evaluates, `Escape` and `Delete`
    /// clear everything and `Backspace` clears the entry. The sign toggle
    /// has no keyboard binding.
    ///
    /// ```rust
    /// use keycalc::core::Operator;
    /// use keycalc::input::Key;
    ///
    /// assert_eq!(Key::from_keyboard("x"), Some(Key::Operator(Operator::Multiply)));
    /// assert_eq!(Key::from_keyboard("Enter"), Some(Key::Evaluate));
    /// assert_eq!(Key::from_keyboard("Tab"), None);
    /// ```
    pub fn from_keyboard(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(Self::Evaluate),
            "Escape" | "Delete" => Some(Self::ClearAll),
            "Backspace" => Some(Self::ClearEntry),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// Map a single printable character to an event.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(digit) = Digit::from_char(c) {
            return Some(Self::Digit(digit));
        }
        let key = match c {
            '.' => Self::DecimalPoint,
            '+' => Self::Operator(Operator::Add),
            '-' => Self::Operator(Operator::Subtract),
            '*' | 'x' | 'X' => Self::Operator(Operator::Multiply),
            '/' => Self::Operator(Operator::Divide),
            '=' => Self::Evaluate,
            '%' => Self::Percent,
            _ => return None,
        };
        Some(key)
    }

    /// Label printed on the keypad button.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Evaluate => "=".to_string(),
            Self::ClearAll => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
        }
    }
}

impl Evaluator {
    /// Apply one keypad event.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => self.input_digit(digit),
            Key::DecimalPoint => self.input_decimal_point(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percentage(),
            Key::Operator(op) => self.choose_operator(op),
            Key::Evaluate => self.evaluate(),
            Key::ClearAll => self.clear_all(),
            Key::ClearEntry => self.clear_entry(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_digit_keys() {
        for c in '0'..='9' {
            assert_eq!(
                Key::from_keyboard(&c.to_string()),
                Some(Key::Digit(Digit::from_char(c).unwrap()))
            );
        }
    }

    #[test]
    fn operator_aliases() {
        let multiply = Some(Key::Operator(Operator::Multiply));
        assert_eq!(Key::from_keyboard("*"), multiply);
        assert_eq!(Key::from_keyboard("x"), multiply);
        assert_eq!(Key::from_keyboard("X"), multiply);
        assert_eq!(
            Key::from_keyboard("/"),
            Some(Key::Operator(Operator::Divide))
        );
    }

    #[test]
    fn named_keys() {
        assert_eq!(Key::from_keyboard("="), Some(Key::Evaluate));
        assert_eq!(Key::from_keyboard("Enter"), Some(Key::Evaluate));
        assert_eq!(Key::from_keyboard("Escape"), Some(Key::ClearAll));
        assert_eq!(Key::from_keyboard("Delete"), Some(Key::ClearAll));
        assert_eq!(Key::from_keyboard("Backspace"), Some(Key::ClearEntry));
        assert_eq!(Key::from_keyboard("%"), Some(Key::Percent));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(Key::from_keyboard("Tab"), None);
        assert_eq!(Key::from_keyboard("12"), None);
        assert_eq!(Key::from_keyboard(""), None);
        assert_eq!(Key::from_char('a'), None);
    }

    #[test]
    fn press_dispatches_every_event() {
        let mut calc = Evaluator::new();
        calc.press(Key::Digit(Digit::new(8).unwrap()));
        calc.press(Key::ToggleSign);
        assert_eq!(calc.display_text(), "-8");
        calc.press(Key::ClearEntry);
        assert_eq!(calc.display_text(), "0");
        calc.press(Key::Digit(Digit::new(5).unwrap()));
        calc.press(Key::DecimalPoint);
        assert_eq!(calc.display_text(), "5.");
        calc.press(Key::Percent);
        assert_eq!(calc.display_text(), "0.05");
        calc.press(Key::Operator(Operator::Add));
        calc.press(Key::Digit(Digit::new(1).unwrap()));
        calc.press(Key::Evaluate);
        assert_eq!(calc.display_text(), "1.05");
        calc.press(Key::ClearAll);
        assert_eq!(calc.display_text(), "0");
        assert_eq!(calc.trace_text(), "");
    }

    #[test]
    fn labels_follow_keypad() {
        assert_eq!(Key::Operator(Operator::Divide).label(), "÷");
        assert_eq!(Key::ToggleSign.label(), "±");
        assert_eq!(Key::ClearEntry.label(), "CE");
    }

    #[test]
    fn key_serializes_with_tag() {
        let json = serde_json::to_string(&Key::Operator(Operator::Add)).unwrap();
        assert_eq!(json, r#"{"kind":"operator","value":"add"}"#);
    }
}
