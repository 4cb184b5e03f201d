//! One-directional structural diff of nested mappings.
//!
//! Walks the keys of the old tree and records, for each one, the new value
//! wherever it differs. Keys only present in the new tree are not reported.
//! A key missing from the new tree reads as [`Value::Null`]; a nested mapping
//! missing from the new tree (or replaced by a scalar) is diffed against an
//! empty mapping.

use serde::Deserialize;
use tracing::trace;

use super::value::{Mapping, Value};

/// How scalar values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equality {
    /// Same variant and same value. `Int(1)` and `Float(1.0)` differ.
    #[default]
    Strict,
    /// Coercive comparison: numeric text equals the number it spells, and
    /// comparisons involving a boolean or null go through truthiness.
    Loose,
}

/// Options for [`diff_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Scalar comparison rule.
    pub equality: Equality,
}

/// Computes the changes that turn `old` into `new`, with strict equality.
///
/// Returns an empty mapping when either side is empty.
///
/// ```rust
/// use blib::arr::{diff, Mapping, Value};
///
/// let old = Mapping::from([
///     ("a", Value::Int(1)),
///     ("b", Mapping::from([("c", 2), ("d", 3)]).into()),
/// ]);
/// let new = Mapping::from([
///     ("a", Value::Int(1)),
///     ("b", Mapping::from([("c", 2), ("d", 4)]).into()),
/// ]);
///
/// let changes = diff(&old, &new);
/// assert_eq!(serde_json::to_string(&changes).unwrap(), r#"{"b":{"d":4}}"#);
/// ```
#[must_use]
pub fn diff(old: &Mapping, new: &Mapping) -> Mapping {
    diff_with(old, new, &DiffOptions::default())
}

/// Computes the changes that turn `old` into `new`.
///
/// Returns an empty mapping when either side is empty; below the top level
/// an empty side is diffed like any other mapping.
#[must_use]
pub fn diff_with(old: &Mapping, new: &Mapping, options: &DiffOptions) -> Mapping {
    if old.is_empty() || new.is_empty() {
        return Mapping::new();
    }
    walk(old, new, options.equality, 0)
}

fn walk(old: &Mapping, new: &Mapping, equality: Equality, depth: usize) -> Mapping {
    let empty = Mapping::new();
    let mut changes = Mapping::new();

    for (key, old_value) in old.iter() {
        let new_value = new.get(key).unwrap_or(&Value::Null);
        match old_value {
            Value::Map(old_child) => {
                let new_child = new_value.as_map().unwrap_or(&empty);
                let child = walk(old_child, new_child, equality, depth + 1);
                if !child.is_empty() {
                    changes.insert(key, child);
                }
            }
            scalar => {
                if !scalars_equal(scalar, new_value, equality) {
                    changes.insert(key, new_value.clone());
                }
            }
        }
    }

    trace!(depth, keys = old.len(), changed = changes.len(), "diffed mapping level");
    changes
}

fn scalars_equal(a: &Value, b: &Value, equality: Equality) -> bool {
    match equality {
        Equality::Strict => strict_eq(a, b),
        Equality::Loose => loose_eq(a, b),
    }
}

/// Same variant and same value. NaN equals NaN so a tree always equals
/// itself.
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}

/// Coercive equality between an old scalar and a new value.
fn loose_eq(a: &Value, b: &Value) -> bool {
    use Value::{Bool, Float, Int, Map, Null, Text};

    match (a, b) {
        (Null, Null) => true,
        (Bool(x), other) | (other, Bool(x)) => *x == truthy(other),
        (Null, Text(s)) | (Text(s), Null) => s.is_empty(),
        (Null, Map(m)) | (Map(m), Null) => m.is_empty(),
        (Null, other) | (other, Null) => !truthy(other),
        (Float(x), Float(y)) if x.is_nan() && y.is_nan() => true,
        (Int(_) | Float(_), Int(_) | Float(_)) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x.same_as(y),
            _ => false,
        },
        (Int(_) | Float(_), Text(s)) | (Text(s), Int(_) | Float(_)) => {
            let n = if matches!(a, Text(_)) { b } else { a };
            match (parse_numeric(s), as_number(n)) {
                (Some(x), Some(y)) => x.same_as(y),
                _ => number_text(n) == *s,
            }
        }
        (Text(x), Text(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(p), Some(q)) => p.same_as(q),
            _ => x == y,
        },
        (Map(x), Map(y)) => x == y,
        _ => false,
    }
}

/// A number read from a scalar. Integers stay exact.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    /// Integers compare exactly; an integer against a float goes through
    /// the float.
    #[allow(clippy::cast_precision_loss)]
    fn same_as(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x == y,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => i as f64 == f,
            (Self::Float(x), Self::Float(y)) => x == y,
        }
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Float(f) => *f != 0.0,
        Value::Text(s) => !(s.is_empty() || s == "0"),
        Value::Map(m) => !m.is_empty(),
    }
}

fn as_number(v: &Value) -> Option<Numeric> {
    match v {
        Value::Int(n) => Some(Numeric::Int(*n)),
        Value::Float(f) => Some(Numeric::Float(*f)),
        _ => None,
    }
}

fn number_text(v: &Value) -> String {
    match v {
        Value::Int(n) => n.to_string(),
        Value::Float(f) => float_text(*f),
        _ => String::new(),
    }
}

/// Significant digits kept when a float is rendered as text.
const FLOAT_DIGITS: i32 = 14;

/// Renders a float with 14 significant digits, switching to `1.0E+25`
/// exponent form when the integer part needs more than 14 digits or more
/// than three zeros would follow the decimal point.
fn float_text(f: f64) -> String {
    if f.is_nan() {
        return String::from("NAN");
    }
    if f.is_infinite() {
        return String::from(if f > 0.0 { "INF" } else { "-INF" });
    }
    if f == 0.0 {
        return String::from(if f.is_sign_negative() { "-0" } else { "0" });
    }

    // One digit before the point and 13 after it.
    let sci = format!("{:.13e}", f.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };
    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let mut out = String::new();
    if f < 0.0 {
        out.push('-');
    }
    if point < -3 || point > FLOAT_DIGITS {
        let (head, tail) = digits.split_at(1);
        out.push_str(head);
        out.push('.');
        out.push_str(if tail.is_empty() { "0" } else { tail });
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
    } else if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        let point = point.unsigned_abs() as usize;
        if digits.len() <= point {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(point - digits.len()));
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}

/// Parses text that spells a number, allowing surrounding whitespace.
/// Integer text stays an integer; anything else numeric becomes a float.
fn parse_numeric(s: &str) -> Option<Numeric> {
    let t = s.trim();
    if t.is_empty() || !t.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    // Rust accepts "inf"/"nan" spellings; those are not numeric strings here.
    if t.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return None;
    }
    t.parse::<i64>()
        .map(Numeric::Int)
        .or_else(|_| t.parse::<f64>().map(Numeric::Float))
        .ok()
}
