// Validator contract

use crate::error::Result;
use crate::model::Model;
use crate::params::{self, Params};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Options shared by every validator kind.
///
/// Read from the rule parameters `on`, `except`, `skipOnError`, `safe` and
/// `message` before the kind-specific factory sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorOptions {
    /// Attributes governed by the validator
    pub attributes: Vec<String>,

    /// Scenarios the validator applies to (empty means all)
    pub on: Vec<String>,

    /// Scenarios the validator never applies to
    pub except: Vec<String>,

    /// Skip attributes that already carry errors
    pub skip_on_error: bool,

    /// Whether governed attributes may be mass-assigned
    pub safe: bool,

    /// Custom message template overriding the kind's default
    pub message: Option<String>,
}

impl ValidatorOptions {
    /// Create options for a list of attributes
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            on: Vec::new(),
            except: Vec::new(),
            skip_on_error: false,
            safe: true,
            message: None,
        }
    }

    /// Extract the common options from rule parameters
    pub fn from_params(attributes: Vec<String>, params: &mut Params) -> Result<Self> {
        let mut options = Self::new(attributes);
        if let Some(on) = params::take_string_list(params, "on")? {
            options.on = on;
        }
        if let Some(except) = params::take_string_list(params, "except")? {
            options.except = except;
        }
        if let Some(skip) = params::take_bool(params, "skipOnError")? {
            options.skip_on_error = skip;
        }
        if let Some(safe) = params::take_bool(params, "safe")? {
            options.safe = safe;
        }
        options.message = params::take_string(params, "message")?;
        Ok(options)
    }

    /// Restrict to the given scenarios
    pub fn on<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on = scenarios.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude the given scenarios
    pub fn except<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = scenarios.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether attributes with errors are skipped
    pub fn with_skip_on_error(mut self, skip: bool) -> Self {
        self.skip_on_error = skip;
        self
    }

    /// Set whether governed attributes are safe for mass assignment
    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Set a custom message template
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check whether these options are active in a scenario
    pub fn applies_to(&self, scenario: &str) -> bool {
        if self.except.iter().any(|s| s == scenario) {
            return false;
        }
        self.on.is_empty() || self.on.iter().any(|s| s == scenario)
    }
}

/// Replace `{name}` placeholders in a message template
pub fn format_message(template: &str, params: &[(&str, String)]) -> String {
    let mut message = template.to_string();
    for (name, value) in params {
        message = message.replace(&format!("{{{}}}", name), value);
    }
    message
}

/// A unit of validation bound to a set of attributes.
///
/// Implementors provide [`validate_attribute`](Validator::validate_attribute);
/// the provided [`validate`](Validator::validate) walks the governed attributes.
/// Findings are written to the model with [`add_error`](Validator::add_error).
pub trait Validator: fmt::Debug + Send + Sync {
    /// Kind name the validator was built from
    fn kind(&self) -> &str;

    /// Common options
    fn options(&self) -> &ValidatorOptions;

    /// Check one attribute of the model
    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()>;

    /// Attributes governed by the validator
    fn attributes(&self) -> &[String] {
        &self.options().attributes
    }

    /// Check whether the validator is active in a scenario
    fn applies_to(&self, scenario: &str) -> bool {
        self.options().applies_to(scenario)
    }

    /// Check whether the validator governs an attribute
    fn governs(&self, attribute: &str) -> bool {
        self.attributes().iter().any(|a| a == attribute)
    }

    /// Whether governed attributes are safe for mass assignment
    fn is_safe(&self) -> bool {
        self.options().safe
    }

    /// Validate the governed attributes, optionally limited to `only`
    fn validate(&self, model: &mut dyn Model, only: Option<&[String]>) -> Result<()> {
        for attribute in self.attributes() {
            if let Some(only) = only
                && !only.contains(attribute)
            {
                continue;
            }
            if self.options().skip_on_error && model.has_errors(Some(attribute)) {
                continue;
            }
            self.validate_attribute(model, attribute)?;
        }
        Ok(())
    }

    /// Record a finding, honouring a custom message template
    fn add_error(
        &self,
        model: &mut dyn Model,
        attribute: &str,
        default_template: &str,
        params: &[(&str, String)],
    ) {
        let template = self.options().message.as_deref().unwrap_or(default_template);
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push(("attribute", model.attribute_label(attribute)));
        all.extend(params.iter().cloned());
        model.add_error(attribute, format_message(template, &all));
    }
}

type CheckFn = dyn Fn(&Value) -> std::result::Result<(), String> + Send + Sync;

/// Validator backed by a closure.
///
/// The closure returns `Err(template)` to report a finding; the template
/// may use the `{attribute}` and `{value}` placeholders.
#[derive(Clone)]
pub struct InlineValidator {
    kind: String,
    options: ValidatorOptions,
    check: Arc<CheckFn>,
}

impl InlineValidator {
    /// Create a closure-backed validator
    pub fn new<F>(kind: impl Into<String>, options: ValidatorOptions, check: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            options,
            check: Arc::new(check),
        }
    }

    pub(crate) fn from_shared(kind: &str, options: ValidatorOptions, check: Arc<CheckFn>) -> Self {
        Self {
            kind: kind.to_string(),
            options,
            check,
        }
    }
}

impl fmt::Debug for InlineValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineValidator")
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Validator for InlineValidator {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let value = model.get(attribute)?;
        if let Err(template) = (self.check)(&value) {
            self.add_error(
                model,
                attribute,
                &template,
                &[("value", crate::value::display(&value))],
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_applies_to_all_by_default() {
        let options = ValidatorOptions::new(["name"]);
        assert!(options.applies_to("default"));
        assert!(options.applies_to("update"));
    }

    #[test]
    fn test_on_and_except() {
        let options = ValidatorOptions::new(["name"]).on(["update"]);
        assert!(options.applies_to("update"));
        assert!(!options.applies_to("default"));

        let options = ValidatorOptions::new(["name"]).except(["import"]);
        assert!(options.applies_to("default"));
        assert!(!options.applies_to("import"));
    }

    #[test]
    fn test_from_params_strips_common_keys() {
        let mut params = match json!({
            "on": "create,update",
            "skipOnError": true,
            "safe": false,
            "message": "{attribute} is wrong",
            "max": 4
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let options = ValidatorOptions::from_params(vec!["name".into()], &mut params).unwrap();
        assert_eq!(options.on, vec!["create", "update"]);
        assert!(options.skip_on_error);
        assert!(!options.safe);
        assert_eq!(options.message.as_deref(), Some("{attribute} is wrong"));
        assert_eq!(params.len(), 1);
        assert!(params.contains_key("max"));
    }

    #[test]
    fn test_format_message() {
        let message = format_message(
            "{attribute} is too long (maximum is {max} characters).",
            &[("attribute", "Name".to_string()), ("max", "4".to_string())],
        );
        assert_eq!(message, "Name is too long (maximum is 4 characters).");
    }
}
