// Numeric validator

use crate::{FromParams, report};
use dynamodel_core::params::{self, Params};
use dynamodel_core::value::{self, Value};
use dynamodel_core::{Model, Result, Validator, ValidatorOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[+-]?\d+\s*$").unwrap());

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?\s*$").unwrap());

/// Checks that an attribute is a number, optionally an integer within bounds.
///
/// Numeric strings are accepted. Parameters: `integerOnly`, `min`, `max`,
/// `tooSmall`, `tooBig`, `allowEmpty`.
#[derive(Debug, Clone)]
pub struct NumberValidator {
    options: ValidatorOptions,
    /// Reject values with a fractional part
    pub integer_only: bool,
    /// Smallest accepted value
    pub min: Option<f64>,
    /// Largest accepted value
    pub max: Option<f64>,
    /// Message used when the value is below `min`
    pub too_small: Option<String>,
    /// Message used when the value is above `max`
    pub too_big: Option<String>,
    /// Skip empty values
    pub allow_empty: bool,
}

impl NumberValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "numerical";

    /// Create a validator accepting any number
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            integer_only: false,
            min: None,
            max: None,
            too_small: None,
            too_big: None,
            allow_empty: true,
        }
    }

    /// Accept only integers
    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    /// Set the lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Numeric value of `value` if it has the required form
    pub fn parse(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => {
                let number = n.as_f64()?;
                (!self.integer_only || number.fract() == 0.0).then_some(number)
            }
            Value::String(s) => {
                let pattern = if self.integer_only {
                    &*INTEGER_REGEX
                } else {
                    &*NUMBER_REGEX
                };
                if pattern.is_match(s) {
                    value::as_number(value)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl FromParams for NumberValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = Self::new(options);
        if let Some(integer_only) = params::take_bool(params, "integerOnly")? {
            validator.integer_only = integer_only;
        }
        validator.min = params::take_f64(params, "min")?;
        validator.max = params::take_f64(params, "max")?;
        validator.too_small = params::take_string(params, "tooSmall")?;
        validator.too_big = params::take_string(params, "tooBig")?;
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for NumberValidator {
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

        let Some(number) = self.parse(&current) else {
            let template = if self.integer_only {
                "{attribute} must be an integer."
            } else {
                "{attribute} must be a number."
            };
            report(self, model, attribute, None, template, &[]);
            return Ok(());
        };

        if let Some(min) = self.min
            && number < min
        {
            report(
                self,
                model,
                attribute,
                self.too_small.as_deref(),
                "{attribute} is too small (minimum is {min}).",
                &[("min", min.to_string())],
            );
        }
        if let Some(max) = self.max
            && number > max
        {
            report(
                self,
                model,
                attribute,
                self.too_big.as_deref(),
                "{attribute} is too big (maximum is {max}).",
                &[("max", max.to_string())],
            );
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
    fn test_parse() {
        let number = NumberValidator::new(ValidatorOptions::new(["n"]));
        assert_eq!(number.parse(&json!(3.5)), Some(3.5));
        assert_eq!(number.parse(&json!(" -1.5e2 ")), Some(-150.0));
        assert_eq!(number.parse(&json!("12abc")), None);
        assert_eq!(number.parse(&json!(true)), None);

        let integer = number.integer_only(true);
        assert_eq!(integer.parse(&json!(42)), Some(42.0));
        assert_eq!(integer.parse(&json!(3.0)), Some(3.0));
        assert_eq!(integer.parse(&json!("+7")), Some(7.0));
        assert_eq!(integer.parse(&json!(3.5)), None);
        assert_eq!(integer.parse(&json!("3.5")), None);
    }

    #[test]
    fn test_messages() {
        let model = run(
            json!({"age": "ten", "count": 1.5}),
            NumberValidator::new(ValidatorOptions::new(["age"])),
        );
        assert_eq!(model.errors().first("age"), Some("Age must be a number."));

        let model = run(
            json!({"count": 1.5}),
            NumberValidator::new(ValidatorOptions::new(["count"])).integer_only(true),
        );
        assert_eq!(model.errors().first("count"), Some("Count must be an integer."));
    }

    #[test]
    fn test_bounds() {
        let validator = NumberValidator::new(ValidatorOptions::new(["age"]))
            .min(18.0)
            .max(99.5);

        let model = run(json!({"age": 17}), validator.clone());
        assert_eq!(
            model.errors().first("age"),
            Some("Age is too small (minimum is 18).")
        );

        let model = run(json!({"age": "100"}), validator.clone());
        assert_eq!(
            model.errors().first("age"),
            Some("Age is too big (maximum is 99.5).")
        );

        let model = run(json!({"age": 30}), validator);
        assert!(!model.has_errors(None));
    }

    #[test]
    fn test_empty_is_skipped() {
        let model = run(
            json!({"age": null}),
            NumberValidator::new(ValidatorOptions::new(["age"])).min(1.0),
        );
        assert!(!model.has_errors(None));
    }
}
