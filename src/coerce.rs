//! Lenient numeric coercion for form values
//!
//! Values that are already numbers pass through untouched, except that integer
//! coercion truncates a real. Text is parsed from its
//! longest numeric prefix, so `"12abc"` is 12 and `"abc"` is not a number. Nothing
//! here fails: an unparsable value becomes NaN (or `None` for integers) and the
//! caller decides what to do with it.

use std::sync::LazyLock;

use regex::Regex;

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("integer prefix pattern"));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))")
        .expect("float prefix pattern")
});

/// A raw value handed over by the front end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric<'a> {
    Int(i64),
    Real(f64),
    Text(&'a str),
}

impl From<i64> for Numeric<'_> {
    fn from(v: i64) -> Self {
        Numeric::Int(v)
    }
}

impl From<u32> for Numeric<'_> {
    fn from(v: u32) -> Self {
        Numeric::Int(v.into())
    }
}

impl From<f64> for Numeric<'_> {
    fn from(v: f64) -> Self {
        Numeric::Real(v)
    }
}

impl<'a> From<&'a str> for Numeric<'a> {
    fn from(v: &'a str) -> Self {
        Numeric::Text(v)
    }
}

impl<'a> From<&'a String> for Numeric<'a> {
    fn from(v: &'a String) -> Self {
        Numeric::Text(v.as_str())
    }
}

/// Coerce to an integer. `None` stands for not-a-number.
///
/// Loop counts are stored as integers, so a real is truncated toward zero
/// (2.7 becomes 2) rather than kept fractional. A non-finite real has no
/// integer value.
pub fn make_int_number<'a>(value: impl Into<Numeric<'a>>) -> Option<i64> {
    match value.into() {
        Numeric::Int(v) => Some(v),
        Numeric::Real(v) if v.is_finite() => Some(v.trunc() as i64),
        Numeric::Real(_) => None,
        Numeric::Text(text) => INT_PREFIX
            .captures(text)
            .and_then(|cap| cap[1].parse::<i64>().ok()),
    }
}

/// Coerce to a real, NaN when the value has no numeric prefix.
pub fn make_float_number<'a>(value: impl Into<Numeric<'a>>) -> f64 {
    match value.into() {
        Numeric::Int(v) => v as f64,
        Numeric::Real(v) => v,
        Numeric::Text(text) => FLOAT_PREFIX
            .captures(text)
            .and_then(|cap| cap[1].parse::<f64>().ok())
            .unwrap_or(f64::NAN),
    }
}

/// Equality used by the setters to skip unchanged values. NaN matches NaN so a
/// repeated bad edit does not re-run a cascade.
pub fn same_value(current: f64, next: f64) -> bool {
    current == next || (current.is_nan() && next.is_nan())
}
