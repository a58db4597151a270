//! Binary operators and digits accepted by the evaluator.

use super::error::EvalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators in keypad order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Symbol used in the trace line.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Apply the operator to two operands.
    ///
    /// Only division can fail, and only when `right` is exactly zero.
    /// Overflow follows IEEE-754 and yields an infinity.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Self::Add => Ok(left + right),
            Self::Subtract => Ok(left - right),
            Self::Multiply => Ok(left * right),
            Self::Divide if right == 0.0 => Err(EvalError::DivisionByZero),
            Self::Divide => Ok(left / right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single decimal digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Returns `None` for anything but an ASCII digit.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a decimal digit"))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_match_keypad_labels() {
        let symbols: Vec<_> = Operator::ALL.iter().map(|op| op.symbol()).collect();
        assert_eq!(symbols, vec!["+", "-", "×", "÷"]);
    }

    #[test]
    fn arithmetic_is_applied() {
        assert_eq!(Operator::Add.apply(5.0, 3.0), Ok(8.0));
        assert_eq!(Operator::Subtract.apply(5.0, 3.0), Ok(2.0));
        assert_eq!(Operator::Multiply.apply(5.0, 3.0), Ok(15.0));
        assert_eq!(Operator::Divide.apply(6.0, 3.0), Ok(2.0));
    }

    #[test]
    fn divide_by_zero_fails() {
        assert_eq!(
            Operator::Divide.apply(5.0, 0.0),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(5.0, -0.0),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn other_operators_accept_zero() {
        assert_eq!(Operator::Multiply.apply(5.0, 0.0), Ok(0.0));
        assert_eq!(Operator::Add.apply(0.0, 0.0), Ok(0.0));
    }

    #[test]
    fn overflow_is_infinite_not_an_error() {
        let result = Operator::Multiply.apply(1e200, 1e200).unwrap();
        assert!(result.is_infinite());
    }

    #[test]
    fn digit_rejects_out_of_range() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert!(Digit::from_char('a').is_none());
        assert_eq!(Digit::from_char('7').map(Digit::value), Some(7));
    }

    #[test]
    fn digit_char_roundtrip() {
        for c in '0'..='9' {
            assert_eq!(Digit::from_char(c).unwrap().as_char(), c);
        }
    }

    #[test]
    fn operator_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Operator::Multiply).unwrap(),
            "\"multiply\""
        );
    }

    #[test]
    fn digit_deserialization_validates() {
        assert!(serde_json::from_str::<Digit>("4").is_ok());
        assert!(serde_json::from_str::<Digit>("12").is_err());
    }
}
