//! Display formatting and lenient numeric reading of the accumulator.
//!
//! Results are shown in the shortest form that reads back to the same
//! `f64`, laid out the way browsers print numbers: plain digits for decimal
//! exponents in `[-7, 21)`, `d.ddde±N` beyond that. A plain form that is
//! too wide for the display is re-rendered in exponential notation with a
//! fixed number of fractional digits.

use serde::{Deserialize, Serialize};

/// Width and precision rules for derived values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFormat {
    /// Longest plain (non-exponential) rendering kept as is.
    pub max_plain_len: usize,
    /// Fractional digits used when falling back to exponential notation.
    pub exponent_digits: usize,
}

impl DisplayFormat {
    pub const DEFAULT_MAX_PLAIN_LEN: usize = 12;
    pub const DEFAULT_EXPONENT_DIGITS: usize = 6;

    /// Format a computed value for the accumulator.
    ///
    /// ```rust
    /// use keycalc::core::DisplayFormat;
    ///
    /// let format = DisplayFormat::default();
    /// assert_eq!(format.format(16.0), "16");
    /// assert_eq!(format.format(1.0 / 3.0), "3.333333e-1");
    /// assert_eq!(format.format(1234567890123.0), "1.234568e+12");
    /// ```
    pub fn format(&self, value: f64) -> String {
        let plain = shortest(value);
        if !value.is_finite() || plain.contains('e') || plain.len() <= self.max_plain_len {
            return plain;
        }
        exponential(value, self.exponent_digits)
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            max_plain_len: Self::DEFAULT_MAX_PLAIN_LEN,
            exponent_digits: Self::DEFAULT_EXPONENT_DIGITS,
        }
    }
}

/// Shortest round-trip decimal rendering of `value`.
pub fn shortest(value: f64) -> String {
    ryu_js::Buffer::new().format(value).to_string()
}

/// Exponential rendering with exactly `fraction_digits` digits after the point.
///
/// Halfway cases round away from zero, so `1000000500000` with six digits
/// becomes `1.000001e+12`.
pub fn exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return shortest(value);
    }
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, mut exponent) = split_exponent(&exact);
    let mut digits: Vec<char> = mantissa.chars().filter(|c| *c != '.').collect();

    let round_up = digits.get(fraction_digits + 1).is_some_and(|d| *d >= '5');
    digits.truncate(fraction_digits + 1);
    if round_up && carry(&mut digits) {
        exponent += 1;
    }

    let lead: String = digits.iter().take(1).collect();
    let rest: String = digits.iter().skip(1).collect();
    let mantissa = if rest.is_empty() {
        lead
    } else {
        format!("{lead}.{rest}")
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", with_signed_exponent(&mantissa, exponent))
}

// Enough fractional digits to spell out any f64 exactly.
const EXACT_DIGITS: usize = 800;

/// Adds one unit in the last place. Returns `true` when the carry ran past
/// the leading digit and the exponent has to grow.
fn carry(digits: &mut Vec<char>) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return false;
        }
    }
    digits.insert(0, '1');
    digits.pop();
    true
}

fn split_exponent(rendered: &str) -> (&str, i32) {
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (rendered, 0),
    }
}

fn with_signed_exponent(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{}", exponent.unsigned_abs())
}

/// Numeric value of an accumulator string.
///
/// Reads the longest leading prefix that forms a number, so a value such as
/// `"1e+21."` still reads as `1e21`. Text with no numeric prefix reads as 0.
pub fn read_number(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        i = 1;
    }

    for word in ["Infinity", "NaN"] {
        if text[i..].starts_with(word) {
            return text[..i + word.len()].parse().unwrap_or(0.0);
        }
    }

    let mut digits = 0;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
        digits += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    let mut end = i;
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'-' | b'+')) {
            j += 1;
        }
        let exponent_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exponent_start {
            end = j;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}
