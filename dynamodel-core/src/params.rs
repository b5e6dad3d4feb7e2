//! Typed access to rule parameters.
//!
//! Parameter names are written in camelCase (`allowEmpty`, `skipOnError`);
//! the snake_case spelling is accepted as well. Every accessor removes the
//! key it reads so that leftovers can be reported as unknown parameters.

use crate::error::{ModelError, Result};
use crate::value::{Map, Value};

/// Open parameter mapping of a rule
pub type Params = Map<String, Value>;

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Remove a raw parameter value
pub fn take(params: &mut Params, key: &str) -> Option<Value> {
    if let Some(value) = params.remove(key) {
        return Some(value);
    }
    let snake = snake_case(key);
    if snake != key {
        params.remove(&snake)
    } else {
        None
    }
}

fn invalid(key: &str, expected: &str, value: &Value) -> ModelError {
    ModelError::configuration(format!(
        "parameter '{}' must be {}, got {}",
        key, expected, value
    ))
}

/// Remove a boolean parameter
pub fn take_bool(params: &mut Params, key: &str) -> Result<Option<bool>> {
    match take(params, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(other) => Err(invalid(key, "a boolean", &other)),
    }
}

/// Remove a non-negative integer parameter
pub fn take_usize(params: &mut Params, key: &str) -> Result<Option<usize>> {
    match take(params, key) {
        None => Ok(None),
        Some(Value::Number(n)) if n.as_u64().is_some() => Ok(n.as_u64().map(|n| n as usize)),
        Some(other) => Err(invalid(key, "a non-negative integer", &other)),
    }
}

/// Remove a numeric parameter
pub fn take_f64(params: &mut Params, key: &str) -> Result<Option<f64>> {
    match take(params, key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(invalid(key, "a number", &other)),
    }
}

/// Remove a string parameter
pub fn take_string(params: &mut Params, key: &str) -> Result<Option<String>> {
    match take(params, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(invalid(key, "a string", &other)),
    }
}

/// Remove a list parameter given either as a comma separated string or an array of strings
pub fn take_string_list(params: &mut Params, key: &str) -> Result<Option<Vec<String>>> {
    match take(params, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(split_names(&s))),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.trim().to_string()),
                other => Err(invalid(key, "a list of strings", &other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(other) => Err(invalid(key, "a string or a list of strings", &other)),
    }
}

/// Split a name list on commas and whitespace, dropping empty pieces
pub fn split_names(spec: &str) -> Vec<String> {
    spec.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fail if any parameter was left unread
pub fn ensure_consumed(kind: &str, params: &Params) -> Result<()> {
    if params.is_empty() {
        return Ok(());
    }
    let mut keys: Vec<&str> = params.keys().map(String::as_str).collect();
    keys.sort_unstable();
    Err(ModelError::configuration(format!(
        "unknown parameter(s) for validator '{}': {}",
        kind,
        keys.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => Params::new(),
        }
    }

    #[test]
    fn test_split_names() {
        assert_eq!(split_names("name,email"), vec!["name", "email"]);
        assert_eq!(split_names(" name , email  age"), vec!["name", "email", "age"]);
        assert!(split_names(" , ").is_empty());
    }

    #[test]
    fn test_snake_case_alias() {
        let mut p = params(json!({"allow_empty": false, "skipOnError": true}));
        assert_eq!(take_bool(&mut p, "allowEmpty").unwrap(), Some(false));
        assert_eq!(take_bool(&mut p, "skipOnError").unwrap(), Some(true));
        assert!(p.is_empty());
    }

    #[test]
    fn test_type_mismatch() {
        let mut p = params(json!({"max": "ten"}));
        assert!(take_usize(&mut p, "max").is_err());

        let mut p = params(json!({"max": -1}));
        assert!(take_usize(&mut p, "max").is_err());
    }

    #[test]
    fn test_string_list() {
        let mut p = params(json!({"on": "create, update", "except": ["admin"]}));
        assert_eq!(
            take_string_list(&mut p, "on").unwrap(),
            Some(vec!["create".to_string(), "update".to_string()])
        );
        assert_eq!(
            take_string_list(&mut p, "except").unwrap(),
            Some(vec!["admin".to_string()])
        );
    }

    #[test]
    fn test_ensure_consumed() {
        assert!(ensure_consumed("length", &Params::new()).is_ok());
        let p = params(json!({"maxx": 3}));
        let err = ensure_consumed("length", &p).unwrap_err();
        assert!(err.to_string().contains("maxx"));
    }
}
