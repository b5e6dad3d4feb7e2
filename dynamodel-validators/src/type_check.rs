// Type validator

use crate::{FromParams, report};
use dynamodel_core::params::{self, Params};
use dynamodel_core::value::{self, Value};
use dynamodel_core::{Model, ModelError, Result, Validator, ValidatorOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());

static FLOAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?([0-9]*\.)?[0-9]+([eE][-+]?[0-9]+)?$").unwrap());

/// Type expected by [`TypeValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// JSON string
    String,
    /// Integer, or an integer string when not strict
    Integer,
    /// Number, or a numeric string when not strict
    Float,
    /// JSON boolean, or its text form when not strict
    Boolean,
    /// JSON array
    Array,
}

impl ValueType {
    /// Type name as written in rules
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
        }
    }

    /// Check a value, with or without type juggling
    pub fn matches(&self, value: &Value, strict: bool) -> bool {
        match (self, value) {
            (ValueType::String, Value::String(_)) => true,
            (ValueType::String, Value::Number(_) | Value::Bool(_)) => !strict,
            (ValueType::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || (!strict && n.as_f64().is_some_and(|f| f.fract() == 0.0))
            }
            (ValueType::Integer, Value::String(s)) => !strict && INTEGER_REGEX.is_match(s.trim()),
            (ValueType::Float, Value::Number(n)) => !strict || n.is_f64(),
            (ValueType::Float, Value::String(s)) => !strict && FLOAT_REGEX.is_match(s.trim()),
            (ValueType::Boolean, Value::Bool(_)) => true,
            (ValueType::Boolean, other) => {
                !strict
                    && value::as_text(other)
                        .is_some_and(|t| matches!(t.as_ref(), "0" | "1" | "true" | "false"))
            }
            (ValueType::Array, Value::Array(_)) => true,
            (ValueType::Array, Value::Object(_)) => !strict,
            _ => false,
        }
    }
}

impl FromStr for ValueType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(ValueType::String),
            "integer" | "int" => Ok(ValueType::Integer),
            "float" | "double" => Ok(ValueType::Float),
            "boolean" | "bool" => Ok(ValueType::Boolean),
            "array" => Ok(ValueType::Array),
            other => Err(ModelError::configuration(format!("unsupported type '{}'", other))),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks the type of an attribute.
///
/// Parameters: `type` (default `string`), `strict`, `allowEmpty`.
#[derive(Debug, Clone)]
pub struct TypeValidator {
    options: ValidatorOptions,
    /// Expected type
    pub value_type: ValueType,
    /// Only accept the native JSON type
    pub strict: bool,
    /// Skip empty values
    pub allow_empty: bool,
}

impl TypeValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "type";

    /// Create a validator expecting `value_type`
    pub fn new(options: ValidatorOptions, value_type: ValueType) -> Self {
        Self {
            options,
            value_type,
            strict: false,
            allow_empty: true,
        }
    }

    /// Only accept the native JSON type
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }
}

impl FromParams for TypeValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let value_type = match params::take_string(params, "type")? {
            Some(name) => name.parse()?,
            None => ValueType::String,
        };
        let mut validator = Self::new(options, value_type);
        if let Some(strict) = params::take_bool(params, "strict")? {
            validator.strict = strict;
        }
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for TypeValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        if self.allow_empty && value::is_empty(&current, false) {
            return Ok(());
        }
        if !self.value_type.matches(&current, self.strict) {
            report(
                self,
                model,
                attribute,
                None,
                "{attribute} must be {type}.",
                &[("type", self.value_type.to_string())],
            );
        }
        Ok(())
    }
}
