//! Rule descriptors.
//!
//! A rule names the attributes it governs, a validator kind and the kind's
//! parameters. Rules can be built with [`RuleSpec`] or written loosely as
//! JSON, in either of two shapes:
//!
//! ```text
//! ["name, email", "length", {"max": 64}]
//! {"attributes": "name, email", "kind": "length", "max": 64}
//! ```

use crate::error::{ModelError, Result};
use crate::params::{Params, split_names};
use crate::validator::Validator;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Parsed rule: attributes, validator kind and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Attribute names governed by the rule
    pub attributes: Vec<String>,

    /// Validator kind
    pub kind: String,

    /// Kind-specific parameters
    #[serde(default, flatten)]
    pub params: Params,
}

impl RuleSpec {
    /// Create a rule from a comma or whitespace separated attribute list
    pub fn new(attributes: &str, kind: impl Into<String>) -> Self {
        Self::for_attributes(split_names(attributes), kind)
    }

    /// Create a rule from an explicit attribute list
    pub fn for_attributes<I, S>(attributes: I, kind: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            kind: kind.into(),
            params: Params::new(),
        }
    }

    /// Set a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Restrict the rule to scenarios
    pub fn on(self, scenarios: &str) -> Self {
        self.param("on", scenarios)
    }

    /// Exclude the rule from scenarios
    pub fn except(self, scenarios: &str) -> Self {
        self.param("except", scenarios)
    }

    /// Set a custom message template
    pub fn message(self, message: &str) -> Self {
        self.param("message", message)
    }

    /// Parse a loosely written rule.
    ///
    /// Fails when the attribute list or the kind is missing.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => Self::from_positional(items),
            Value::Object(map) => Self::from_table(map),
            other => Err(ModelError::configuration(format!(
                "a rule must be an array or an object, got {}",
                other
            ))),
        }
    }

    fn from_positional(items: &[Value]) -> Result<Self> {
        let (Some(attributes), Some(kind)) = (items.first(), items.get(1)) else {
            return Err(missing_parts());
        };
        let attributes = parse_attributes(attributes)?;
        let kind = parse_kind(kind)?;

        let mut params = Params::new();
        for extra in &items[2..] {
            match extra {
                Value::Object(map) => {
                    params.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                other => {
                    return Err(ModelError::configuration(format!(
                        "rule parameters must be objects, got {}",
                        other
                    )));
                }
            }
        }

        Ok(Self {
            attributes,
            kind,
            params,
        })
    }

    fn from_table(map: &Params) -> Result<Self> {
        let mut params = map.clone();
        let attributes = params.remove("attributes").ok_or_else(missing_parts)?;
        let kind = params
            .remove("kind")
            .or_else(|| params.remove("validator"))
            .ok_or_else(missing_parts)?;

        Ok(Self {
            attributes: parse_attributes(&attributes)?,
            kind: parse_kind(&kind)?,
            params,
        })
    }
}

fn missing_parts() -> ModelError {
    ModelError::configuration("a rule must specify both attribute names and validator type")
}

fn parse_attributes(value: &Value) -> Result<Vec<String>> {
    let names = match value {
        Value::String(spec) => split_names(spec),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
                other => Err(ModelError::configuration(format!(
                    "attribute names must be non-empty strings, got {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(ModelError::configuration(format!(
                "attribute names must be a string or a list, got {}",
                other
            )));
        }
    };
    if names.is_empty() {
        return Err(missing_parts());
    }
    Ok(names)
}

fn parse_kind(value: &Value) -> Result<String> {
    match value {
        Value::String(kind) if !kind.trim().is_empty() => Ok(kind.trim().to_string()),
        _ => Err(missing_parts()),
    }
}

/// Anything that can be added to a model as a rule
#[derive(Debug, Clone)]
pub enum Rule {
    /// A ready validator, added unchanged
    Validator(Arc<dyn Validator>),
    /// A parsed descriptor, built through the catalogue
    Spec(RuleSpec),
    /// A loosely written descriptor, parsed when added
    Descriptor(Value),
}

impl From<Arc<dyn Validator>> for Rule {
    fn from(validator: Arc<dyn Validator>) -> Self {
        Self::Validator(validator)
    }
}

impl From<RuleSpec> for Rule {
    fn from(spec: RuleSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<Value> for Rule {
    fn from(value: Value) -> Self {
        Self::Descriptor(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positional_rule() {
        let spec = RuleSpec::from_value(&json!(["name,email", "length", {"max": 64}])).unwrap();
        assert_eq!(spec.attributes, vec!["name", "email"]);
        assert_eq!(spec.kind, "length");
        assert_eq!(spec.params["max"], 64);
    }

    #[test]
    fn test_positional_rule_with_list() {
        let spec = RuleSpec::from_value(&json!([["name", "email"], "required"])).unwrap();
        assert_eq!(spec.attributes, vec!["name", "email"]);
        assert!(spec.params.is_empty());
    }

    #[test]
    fn test_table_rule() {
        let spec = RuleSpec::from_value(&json!({
            "attributes": "email",
            "validator": "email",
            "on": "signup"
        }))
        .unwrap();
        assert_eq!(spec.attributes, vec!["email"]);
        assert_eq!(spec.kind, "email");
        assert_eq!(spec.params["on"], "signup");
    }

    #[test]
    fn test_missing_kind() {
        let err = RuleSpec::from_value(&json!(["email"])).unwrap_err();
        assert!(err.is_configuration());

        let err = RuleSpec::from_value(&json!({"attributes": "email"})).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_attributes() {
        assert!(RuleSpec::from_value(&json!([" , ", "email"])).is_err());
        assert!(RuleSpec::from_value(&json!([[], "email"])).is_err());
        assert!(RuleSpec::from_value(&json!([])).is_err());
    }

    #[test]
    fn test_bad_shapes() {
        assert!(RuleSpec::from_value(&json!("email")).is_err());
        assert!(RuleSpec::from_value(&json!(["email", "length", 64])).is_err());
        assert!(RuleSpec::from_value(&json!(["email", 5])).is_err());
    }

    #[test]
    fn test_builder() {
        let spec = RuleSpec::new("name, email", "length")
            .param("max", 128)
            .on("update");
        assert_eq!(spec.attributes, vec!["name", "email"]);
        assert_eq!(spec.params["max"], 128);
        assert_eq!(spec.params["on"], "update");
    }
}
