//! Validators that shape attribute values or mass-assignment rather than
//! reporting findings.

use crate::FromParams;
use dynamodel_core::params::{self, Params};
use dynamodel_core::value::Value;
use dynamodel_core::{Model, ModelError, Result, Validator, ValidatorOptions};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Fills in a value for empty attributes.
///
/// With `setOnEmpty = false` the value is written unconditionally.
#[derive(Debug, Clone)]
pub struct DefaultValueValidator {
    options: ValidatorOptions,
    /// Value written into the attribute
    pub value: Value,
    /// Only write when the current value is empty
    pub set_on_empty: bool,
}

impl DefaultValueValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "default";

    /// Create a validator assigning `value`
    pub fn new(options: ValidatorOptions, value: impl Into<Value>) -> Self {
        Self {
            options,
            value: value.into(),
            set_on_empty: true,
        }
    }

    /// Write the default even over non-empty values when `false`
    pub fn set_on_empty(mut self, set_on_empty: bool) -> Self {
        self.set_on_empty = set_on_empty;
        self
    }
}

impl FromParams for DefaultValueValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let value = params::take(params, "value").unwrap_or(Value::Null);
        let mut validator = Self::new(options, value);
        if let Some(set_on_empty) = params::take_bool(params, "setOnEmpty")? {
            validator.set_on_empty = set_on_empty;
        }
        Ok(validator)
    }
}

impl Validator for DefaultValueValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        if self.set_on_empty {
            let current = model.get(attribute)?;
            let empty = match &current {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                _ => false,
            };
            if !empty {
                return Ok(());
            }
        }
        trace!(attribute = %attribute, "Applying default value");
        model.set(attribute, self.value.clone())
    }
}

type FilterFn = dyn Fn(Value) -> Value + Send + Sync;

/// Transformation applied by [`FilterValidator`]
#[derive(Clone)]
pub enum Filter {
    /// Strip surrounding whitespace from strings
    Trim,
    /// Lowercase strings
    Lowercase,
    /// Uppercase strings
    Uppercase,
    /// Arbitrary transformation
    Custom(Arc<FilterFn>),
}

impl Filter {
    /// Wrap a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Filter::Custom(Arc::new(f))
    }

    /// Look up a named filter
    pub fn named(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "trim" => Ok(Filter::Trim),
            "lowercase" | "lower" | "strtolower" => Ok(Filter::Lowercase),
            "uppercase" | "upper" | "strtoupper" => Ok(Filter::Uppercase),
            other => Err(ModelError::configuration(format!("unknown filter '{}'", other))),
        }
    }

    /// Apply the filter; non-string values pass through named filters unchanged
    pub fn apply(&self, value: Value) -> Value {
        match (self, value) {
            (Filter::Trim, Value::String(s)) => Value::String(s.trim().to_string()),
            (Filter::Lowercase, Value::String(s)) => Value::String(s.to_lowercase()),
            (Filter::Uppercase, Value::String(s)) => Value::String(s.to_uppercase()),
            (Filter::Custom(f), value) => f(value),
            (_, value) => value,
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Trim => f.write_str("Trim"),
            Filter::Lowercase => f.write_str("Lowercase"),
            Filter::Uppercase => f.write_str("Uppercase"),
            Filter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Rewrites attribute values through a [`Filter`]. Never reports findings.
///
/// Parameters: `filter` (required name: `trim`, `lowercase`, `uppercase`).
#[derive(Debug, Clone)]
pub struct FilterValidator {
    options: ValidatorOptions,
    /// Transformation applied to each attribute
    pub filter: Filter,
}

impl FilterValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "filter";

    /// Create a validator applying `filter`
    pub fn new(options: ValidatorOptions, filter: Filter) -> Self {
        Self { options, filter }
    }

    /// Build from parameters, using `fallback` when no `filter` is given
    pub fn from_params_or(
        options: ValidatorOptions,
        params: &mut Params,
        fallback: Filter,
    ) -> Result<Self> {
        let filter = match params::take_string(params, "filter")? {
            Some(name) => Filter::named(&name)?,
            None => fallback,
        };
        Ok(Self::new(options, filter))
    }
}

impl FromParams for FilterValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let name = params::take_string(params, "filter")?
            .ok_or_else(|| ModelError::configuration("the \"filter\" parameter is required"))?;
        Ok(Self::new(options, Filter::named(&name)?))
    }
}

impl Validator for FilterValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        let filtered = self.filter.apply(current);
        trace!(attribute = %attribute, filter = ?self.filter, "Filtered attribute value");
        model.set(attribute, filtered)
    }
}

/// Marks attributes safe for mass assignment without checking them
#[derive(Debug, Clone)]
pub struct SafeValidator {
    options: ValidatorOptions,
}

impl SafeValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "safe";

    /// Create a validator marking its attributes safe
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options: options.with_safe(true),
        }
    }
}

impl FromParams for SafeValidator {
    fn from_params(options: ValidatorOptions, _params: &mut Params) -> Result<Self> {
        Ok(Self::new(options))
    }
}

impl Validator for SafeValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, _model: &mut dyn Model, _attribute: &str) -> Result<()> {
        Ok(())
    }
}

/// Marks attributes unsafe for mass assignment without checking them
#[derive(Debug, Clone)]
pub struct UnsafeValidator {
    options: ValidatorOptions,
}

impl UnsafeValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "unsafe";

    /// Create a validator marking its attributes unsafe
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options: options.with_safe(false),
        }
    }
}

impl FromParams for UnsafeValidator {
    fn from_params(options: ValidatorOptions, _params: &mut Params) -> Result<Self> {
        Ok(Self::new(options))
    }
}

impl Validator for UnsafeValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, _model: &mut dyn Model, _attribute: &str) -> Result<()> {
        Ok(())
    }
}
