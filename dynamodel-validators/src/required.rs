// Required validator

use crate::{FromParams, report};
use dynamodel_core::params::{self, Params};
use dynamodel_core::value::{self, Value};
use dynamodel_core::{Model, Result, Validator, ValidatorOptions};

/// Checks that an attribute is not empty, or that it equals a required value.
///
/// Parameters: `requiredValue`, `strict`, `trim` (default `true`).
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    options: ValidatorOptions,
    /// Value the attribute must equal; `None` only requires a non-empty value
    pub required_value: Option<Value>,
    /// Compare against `required_value` without type juggling
    pub strict: bool,
    /// Treat whitespace-only strings as empty
    pub trim: bool,
}

impl RequiredValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "required";

    /// Create a validator rejecting empty values
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            required_value: None,
            strict: false,
            trim: true,
        }
    }

    /// Require this exact value instead of any non-empty one
    pub fn required_value(mut self, value: impl Into<Value>) -> Self {
        self.required_value = Some(value.into());
        self
    }

    /// Compare `required_value` including the JSON type
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Treat whitespace-only strings as empty
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl FromParams for RequiredValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = Self::new(options);
        validator.required_value = params::take(params, "requiredValue");
        if let Some(strict) = params::take_bool(params, "strict")? {
            validator.strict = strict;
        }
        if let Some(trim) = params::take_bool(params, "trim")? {
            validator.trim = trim;
        }
        Ok(validator)
    }
}

impl Validator for RequiredValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        match &self.required_value {
            Some(required) => {
                let matches = if self.strict {
                    &current == required
                } else {
                    value::loose_eq(&current, required)
                };
                if !matches {
                    report(
                        self,
                        model,
                        attribute,
                        None,
                        "{attribute} must be {value}.",
                        &[("value", value::display(required))],
                    );
                }
            }
            None => {
                let empty = if self.strict {
                    current.is_null()
                } else {
                    value::is_empty(&current, self.trim)
                };
                if empty {
                    report(self, model, attribute, None, "{attribute} cannot be blank.", &[]);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run;
    use serde_json::json;

    #[test]
    fn test_blank_values() {
        let options = ValidatorOptions::new(["a", "b", "c", "d", "e"]);
        let model = run(
            json!({"a": null, "b": "", "c": "   ", "d": [], "e": "x"}),
            RequiredValidator::new(options),
        );
        assert_eq!(model.errors().first("a"), Some("A cannot be blank."));
        assert!(model.has_errors(Some("b")));
        assert!(model.has_errors(Some("c")));
        assert!(model.has_errors(Some("d")));
        assert!(!model.has_errors(Some("e")));
    }

    #[test]
    fn test_whitespace_without_trim() {
        let model = run(
            json!({"name": "  "}),
            RequiredValidator::new(ValidatorOptions::new(["name"])).trim(false),
        );
        assert!(!model.has_errors(None));
    }

    #[test]
    fn test_zero_is_not_blank() {
        let model = run(
            json!({"count": 0, "flag": false}),
            RequiredValidator::new(ValidatorOptions::new(["count", "flag"])),
        );
        assert!(!model.has_errors(None));
    }

    #[test]
    fn test_required_value() {
        let model = run(
            json!({"terms": "1", "strict": "1"}),
            RequiredValidator::new(ValidatorOptions::new(["terms"])).required_value(1),
        );
        assert!(!model.has_errors(None));

        let model = run(
            json!({"terms": "1"}),
            RequiredValidator::new(ValidatorOptions::new(["terms"]))
                .required_value(1)
                .strict(true),
        );
        assert_eq!(model.errors().first("terms"), Some("Terms must be 1."));
    }

    #[test]
    fn test_custom_message() {
        let options = ValidatorOptions::new(["name"]).with_message("Please fill in {attribute}");
        let model = run(json!({"name": ""}), RequiredValidator::new(options));
        assert_eq!(model.errors().first("name"), Some("Please fill in Name"));
    }

    #[test]
    fn test_from_params() {
        let mut params = Params::new();
        params.insert("requiredValue".into(), json!("yes"));
        params.insert("trim".into(), json!(false));
        let validator =
            RequiredValidator::from_params(ValidatorOptions::new(["agree"]), &mut params).unwrap();
        assert_eq!(validator.required_value, Some(json!("yes")));
        assert!(!validator.trim);
        assert!(params.is_empty());
    }
}
