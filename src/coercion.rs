//! Value coercion.
//!
//! Two separate paths live here and they deliberately disagree:
//!
//! - **Assignment** ([`coerce`]) turns a raw configured string into its best-guess typed
//!   [`Value`] before it is stored in a record (`"15"` becomes the number `15`).
//! - **Comparison** ([`display_string`], [`to_number`]) renders an existing field value the way
//!   a JavaScript host would with `String(v)` / `Number(v)`. Operands are compared in their raw
//!   textual form and are never run through [`coerce`].
//!
//! A missing field is represented as `None` throughout and renders as `"undefined"`, while an
//! explicit null renders as `"null"`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Value;

lazy_static! {
    static ref DECIMAL_LITERAL: Regex = Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)$").unwrap();
    static ref NUMERIC_STRING: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)$").unwrap();
    static ref ISO_DATE: Regex = Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(?:T([0-9]{2}):([0-9]{2})(?::([0-9]{2})(?:\.([0-9]{1,9}))?)?(Z|[+-][0-9]{2}:?[0-9]{2})?)?$"
    )
    .unwrap();
}

/// Coerce a raw assignment string into a typed value.
///
/// Rules are tried in order and the first match wins:
///
/// 1. `"null"` → [`Value::Null`]
/// 2. `"true"` / `"false"` → [`Value::Bool`]
/// 3. a signed base-10 integer or decimal → [`Value::Number`]
/// 4. an ISO-8601 date or date-time → [`Value::Date`]
/// 5. a complete JSON object or array → [`Value::Object`] / [`Value::Array`]
/// 6. anything else → the original string, untouched
///
/// Rules 1-5 look at the trimmed input.
///
/// ```rust
/// use record_query::coercion::coerce;
/// use record_query::types::Value;
///
/// assert_eq!(coerce("15"), Value::Number(15.0));
/// assert_eq!(coerce(" true "), Value::Bool(true));
/// assert_eq!(coerce("001-ABC"), Value::string("001-ABC"));
/// ```
pub fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();

    match trimmed {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if DECIMAL_LITERAL.is_match(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            return Value::Number(n);
        }
    }

    if let Some(date) = parse_iso_datetime(trimmed) {
        return Value::Date(date);
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(trimmed) {
            if parsed.is_object() || parsed.is_array() {
                return Value::from(parsed);
            }
        }
    }

    Value::String(raw.to_owned())
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS[.fff]][Z|±HH:MM]` into a UTC instant.
///
/// Date-only and offset-less inputs are read as UTC. Fractions beyond milliseconds are
/// truncated. Impossible calendar dates (`2026-02-30`) are rejected.
pub fn parse_iso_datetime(s: &str) -> Option<DateTime<Utc>> {
    let caps = ISO_DATE.captures(s)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, num(2)?, num(3)?)?;

    let millis = caps
        .get(7)
        .map(|m| {
            let digits: String = m.as_str().chars().chain("00".chars()).take(3).collect();
            digits.parse::<u32>().unwrap_or(0)
        })
        .unwrap_or(0);
    let time = match caps.get(4) {
        Some(_) => NaiveTime::from_hms_milli_opt(num(4)?, num(5)?, num(6).unwrap_or(0), millis)?,
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };

    let offset_minutes = match caps.get(8).map(|m| m.as_str()) {
        None | Some("Z") => 0,
        Some(offset) => {
            let sign = if offset.starts_with('-') { -1 } else { 1 };
            let digits: String = offset[1..].chars().filter(|c| c.is_ascii_digit()).collect();
            let hours: i64 = digits.get(..2)?.parse().ok()?;
            let minutes: i64 = digits.get(2..)?.parse().ok()?;
            if hours > 23 || minutes > 59 {
                return None;
            }
            sign * (hours * 60 + minutes)
        }
    };

    let local = date.and_time(time);
    Some(Utc.from_utc_datetime(&(local - Duration::minutes(offset_minutes))))
}

/// Render a field value the way `String(value)` does in a JavaScript host.
///
/// `None` (field absent) renders as `"undefined"`.
pub fn display_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) => value_string(v),
    }
}

fn value_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Date(d) => Value::iso_string(d),
        Value::Array(items) => join_values(items.iter().map(Some), ","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `Array.prototype.join`: null and missing elements render as empty strings.
pub fn join_values<'a, I>(values: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    values
        .into_iter()
        .map(|v| match v {
            None | Some(Value::Null) => String::new(),
            Some(v) => value_string(v),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Format a number like JavaScript's `Number.prototype.toString()`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{n:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

/// Convert a field value to a number the way `Number(value)` does.
///
/// Missing fields and objects are `NaN`; `null` is `0`; dates are epoch milliseconds.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => *n,
        Some(Value::String(s)) => string_to_number(s),
        Some(Value::Date(d)) => d.timestamp_millis() as f64,
        Some(v @ Value::Array(_)) => string_to_number(&value_string(v)),
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// `Number(string)`: whitespace-only is `0`, anything unparseable is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match t.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &t[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits.chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN);
    }

    if NUMERIC_STRING.is_match(t) {
        t.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// JavaScript falsiness: missing, `null`, `false`, `0`, `NaN` and `""`.
///
/// Arrays, objects and dates are never falsy, even when empty.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => *n == 0.0 || n.is_nan(),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Date(_)) | Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}
