//! Number: a JSON number that renders back to the digits it was read from.
//!
//! Integers that fit in `i64`/`u64` and doubles whose canonical text is the
//! literal itself are held natively. Every other literal (`1E2`,
//! `12345678901234567890123`, `0.10000000000000000000001`) keeps its source
//! text, so parse-then-render never drops digits.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Number(Repr);

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    Int(i64),
    /// Only for values above `i64::MAX`.
    UInt(u64),
    /// Always finite.
    Float(f64),
    /// Grammar-checked source text whose magnitude fits in a double.
    Literal(Box<str>),
}

impl Number {
    /// Returns `None` for NaN and infinities, which JSON cannot represent.
    pub fn from_f64(f: f64) -> Option<Self> {
        f.is_finite().then_some(Self(Repr::Float(f)))
    }

    /// Build a number from a literal that already matched the JSON number
    /// grammar. `None` when its magnitude overflows a double.
    pub(crate) fn from_literal(literal: &str, integral: bool) -> Option<Self> {
        if integral {
            if let Ok(n) = literal.parse::<i64>() {
                return Some(n.into());
            }
            if let Ok(n) = literal.parse::<u64>() {
                return Some(n.into());
            }
        }
        let f = literal.parse::<f64>().ok().filter(|f| f.is_finite())?;
        if !integral && format_f64(f) == literal {
            return Some(Self(Repr::Float(f)));
        }
        Some(Self(Repr::Literal(literal.into())))
    }

    pub fn is_i64(&self) -> bool {
        matches!(self.0, Repr::Int(_))
    }

    pub fn is_u64(&self) -> bool {
        match self.0 {
            Repr::Int(n) => n >= 0,
            Repr::UInt(_) => true,
            _ => false,
        }
    }

    /// True for doubles and for literals written with a fraction or an
    /// exponent.
    pub fn is_f64(&self) -> bool {
        match &self.0 {
            Repr::Float(_) => true,
            Repr::Literal(text) => text.contains(['.', 'e', 'E']),
            _ => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            Repr::Int(n) => u64::try_from(n).ok(),
            Repr::UInt(n) => Some(n),
            _ => None,
        }
    }

    /// The nearest double. Literals longer than a double can hold are
    /// rounded.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            Repr::Int(n) => Some(*n as f64),
            Repr::UInt(n) => Some(*n as f64),
            Repr::Float(f) => Some(*f),
            Repr::Literal(text) => text.parse().ok(),
        }
    }

    pub(crate) fn to_serde_json(&self) -> Option<serde_json::Number> {
        match &self.0 {
            Repr::Int(n) => Some((*n).into()),
            Repr::UInt(n) => Some((*n).into()),
            Repr::Float(f) => serde_json::Number::from_f64(*f),
            Repr::Literal(text) => text
                .parse()
                .ok()
                .or_else(|| self.as_f64().and_then(serde_json::Number::from_f64)),
        }
    }
}

/// Shortest round-trip text from ryu, without an integral `.0` and without
/// a `+` in the exponent: `20.5`, `1`, `1e300`, `1e-7`.
fn format_f64(f: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    let text = buffer.format_finite(f);
    let mut out = String::with_capacity(text.len());
    match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => {
            out.push_str(mantissa.strip_suffix(".0").unwrap_or(mantissa));
            out.push('e');
            out.push_str(exponent.strip_prefix('+').unwrap_or(exponent));
        }
        None => out.push_str(text.strip_suffix(".0").unwrap_or(text)),
    }
    out
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Int(n) => write!(f, "{n}"),
            Repr::UInt(n) => write!(f, "{n}"),
            Repr::Float(x) => f.write_str(&format_f64(*x)),
            Repr::Literal(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self(Repr::Int(n))
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Self(Repr::Int(n)),
            Err(_) => Self(Repr::UInt(n)),
        }
    }
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            return i.into();
        }
        if let Some(u) = n.as_u64() {
            return u.into();
        }
        match n.as_f64().and_then(Self::from_f64) {
            Some(number) => number,
            None => Self(Repr::Literal(n.to_string().into())),
        }
    }
}
