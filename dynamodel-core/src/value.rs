//! Attribute values.
//!
//! Attributes hold arbitrary JSON values; `Value::Null` is the unset value.
//! Validators interpret values through the helpers below.

use std::borrow::Cow;

pub use serde_json::{Map, Value};

/// Check whether a value counts as empty.
///
/// Null, the empty string, an empty array and an empty object are empty.
/// With `trim`, strings made only of whitespace are empty as well.
pub fn is_empty(value: &Value, trim: bool) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) if trim => s.trim().is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Text form of a scalar value.
///
/// Returns `None` for arrays and objects, which have no text form.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => Some(Cow::Borrowed("")),
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric form of a value, accepting numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Render a value for use inside a message.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose equality: numbers compare numerically, everything else by text.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x == y;
    }
    match (as_text(a), as_text(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null, false));
        assert!(is_empty(&json!(""), false));
        assert!(is_empty(&json!([]), false));
        assert!(is_empty(&json!({}), false));
        assert!(!is_empty(&json!("  "), false));
        assert!(is_empty(&json!("  "), true));
        assert!(!is_empty(&json!(0), false));
        assert!(!is_empty(&json!(false), false));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(42)), Some(42.0));
        assert_eq!(as_number(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!("")), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&json!("10"), &json!(10)));
        assert!(loose_eq(&json!("abc"), &json!("abc")));
        assert!(!loose_eq(&json!("abc"), &json!("abd")));
        assert!(loose_eq(&json!([1]), &json!([1])));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&json!("text")), "text");
        assert_eq!(display(&json!(12)), "12");
        assert_eq!(display(&Value::Null), "");
    }
}
