// Comparison validators

use crate::{FromParams, report};
use dynamodel_core::params::{self, Params};
use dynamodel_core::value::{self, Value};
use dynamodel_core::{Model, ModelError, Result, Validator, ValidatorOptions};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of [`CompareValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
}

impl CompareOperator {
    /// Operator symbol as written in rules
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOperator::Equal => "==",
            CompareOperator::NotEqual => "!=",
            CompareOperator::Greater => ">",
            CompareOperator::GreaterOrEqual => ">=",
            CompareOperator::Less => "<",
            CompareOperator::LessOrEqual => "<=",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            CompareOperator::Equal => "{attribute} must be repeated exactly.",
            CompareOperator::NotEqual => "{attribute} must not be equal to \"{compareValue}\".",
            CompareOperator::Greater => "{attribute} must be greater than \"{compareValue}\".",
            CompareOperator::GreaterOrEqual => {
                "{attribute} must be greater than or equal to \"{compareValue}\"."
            }
            CompareOperator::Less => "{attribute} must be less than \"{compareValue}\".",
            CompareOperator::LessOrEqual => {
                "{attribute} must be less than or equal to \"{compareValue}\"."
            }
        }
    }
}

impl FromStr for CompareOperator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" | "==" => Ok(CompareOperator::Equal),
            "!=" => Ok(CompareOperator::NotEqual),
            ">" => Ok(CompareOperator::Greater),
            ">=" => Ok(CompareOperator::GreaterOrEqual),
            "<" => Ok(CompareOperator::Less),
            "<=" => Ok(CompareOperator::LessOrEqual),
            other => Err(ModelError::configuration(format!(
                "invalid comparison operator '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn order(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (value::as_number(a), value::as_number(b)) {
        return x.partial_cmp(&y);
    }
    match (value::as_text(a), value::as_text(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => None,
    }
}

/// Compares an attribute with another attribute or with a constant.
///
/// Without `compareValue` the attribute is compared with
/// `compareAttribute`, which defaults to `<attribute>_repeat`.
/// Parameters: `compareAttribute`, `compareValue`, `operator`, `strict`,
/// `allowEmpty` (default `false`).
#[derive(Debug, Clone)]
pub struct CompareValidator {
    options: ValidatorOptions,
    /// Attribute holding the value to compare against
    pub compare_attribute: Option<String>,
    /// Constant to compare against, used before `compare_attribute`
    pub compare_value: Option<Value>,
    /// How the two values are compared
    pub operator: CompareOperator,
    /// Require equal JSON types for equality checks
    pub strict: bool,
    /// Skip empty values
    pub allow_empty: bool,
}

impl CompareValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "compare";

    /// Create a validator comparing against `{attribute}_repeat`
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            compare_attribute: None,
            compare_value: None,
            operator: CompareOperator::Equal,
            strict: false,
            allow_empty: false,
        }
    }

    /// Compare against another attribute
    pub fn compare_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.compare_attribute = Some(attribute.into());
        self
    }

    /// Compare against a constant
    pub fn compare_value(mut self, value: impl Into<Value>) -> Self {
        self.compare_value = Some(value.into());
        self
    }

    /// Set the comparison operator
    pub fn operator(mut self, operator: CompareOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Require equal JSON types
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    fn holds(&self, current: &Value, target: &Value) -> bool {
        match self.operator {
            CompareOperator::Equal if self.strict => current == target,
            CompareOperator::Equal => value::loose_eq(current, target),
            CompareOperator::NotEqual if self.strict => current != target,
            CompareOperator::NotEqual => !value::loose_eq(current, target),
            CompareOperator::Greater => order(current, target) == Some(Ordering::Greater),
            CompareOperator::GreaterOrEqual => matches!(
                order(current, target),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOperator::Less => order(current, target) == Some(Ordering::Less),
            CompareOperator::LessOrEqual => {
                matches!(order(current, target), Some(Ordering::Less | Ordering::Equal))
            }
        }
    }
}

impl FromParams for CompareValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = Self::new(options);
        validator.compare_attribute = params::take_string(params, "compareAttribute")?;
        validator.compare_value = params::take(params, "compareValue");
        if let Some(operator) = params::take_string(params, "operator")? {
            validator.operator = operator.parse()?;
        }
        if let Some(strict) = params::take_bool(params, "strict")? {
            validator.strict = strict;
        }
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for CompareValidator {
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

        let (target, shown) = match &self.compare_value {
            Some(target) => (target.clone(), value::display(target)),
            None => {
                let other = self
                    .compare_attribute
                    .clone()
                    .unwrap_or_else(|| format!("{}_repeat", attribute));
                (model.get(&other)?, model.attribute_label(&other))
            }
        };

        if !self.holds(&current, &target) {
            report(
                self,
                model,
                attribute,
                None,
                self.operator.message(),
                &[("compareValue", shown)],
            );
        }
        Ok(())
    }
}

/// Checks that an attribute is (or, with `not`, is not) one of a list of values.
///
/// Parameters: `range` (required list), `strict`, `not`, `allowEmpty`.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    options: ValidatorOptions,
    /// Accepted values
    pub range: Vec<Value>,
    /// Require equal JSON types when matching
    pub strict: bool,
    /// Fail when the value is in the range instead
    pub not: bool,
    /// Skip empty values
    pub allow_empty: bool,
}

impl RangeValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "in";

    /// Create a validator accepting the values in `range`
    pub fn new<I, V>(options: ValidatorOptions, range: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            options,
            range: range.into_iter().map(Into::into).collect(),
            strict: false,
            not: false,
            allow_empty: true,
        }
    }

    /// Require equal JSON types when matching
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Invert the check
    pub fn not(mut self, not: bool) -> Self {
        self.not = not;
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Whether the value occurs in the list
    pub fn contains(&self, candidate: &Value) -> bool {
        self.range.iter().any(|item| {
            if self.strict {
                item == candidate
            } else {
                value::loose_eq(item, candidate)
            }
        })
    }
}

impl FromParams for RangeValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let range = match params::take(params, "range") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ModelError::configuration(format!(
                    "the \"range\" parameter must be a list, got {}",
                    other
                )));
            }
            None => {
                return Err(ModelError::configuration(
                    "the \"range\" parameter is required",
                ));
            }
        };
        let mut validator = Self::new(options, range);
        if let Some(strict) = params::take_bool(params, "strict")? {
            validator.strict = strict;
        }
        if let Some(not) = params::take_bool(params, "not")? {
            validator.not = not;
        }
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for RangeValidator {
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
        let found = self.contains(&current);
        if !self.not && !found {
            report(self, model, attribute, None, "{attribute} is not in the list.", &[]);
        } else if self.not && found {
            report(self, model, attribute, None, "{attribute} is in the list.", &[]);
        }
        Ok(())
    }
}

/// Checks that an attribute is a boolean flag.
///
/// Non-strict mode accepts JSON booleans and anything loosely equal to
/// `trueValue` (default `"1"`) or `falseValue` (default `"0"`). Strict mode
/// requires one of the two values exactly.
#[derive(Debug, Clone)]
pub struct BooleanValidator {
    options: ValidatorOptions,
    /// Value representing true
    pub true_value: Value,
    /// Value representing false
    pub false_value: Value,
    /// Require an exact match, including the JSON type
    pub strict: bool,
    /// Skip empty values
    pub allow_empty: bool,
}

impl BooleanValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "boolean";

    /// Create a validator accepting `"1"` and `"0"`
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            true_value: Value::from("1"),
            false_value: Value::from("0"),
            strict: false,
            allow_empty: true,
        }
    }

    /// Replace the true and false values
    pub fn values(mut self, true_value: impl Into<Value>, false_value: impl Into<Value>) -> Self {
        self.true_value = true_value.into();
        self.false_value = false_value.into();
        self
    }

    /// Require an exact match
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Whether `candidate` is one of the two accepted values
    pub fn accepts(&self, candidate: &Value) -> bool {
        if self.strict {
            return candidate == &self.true_value || candidate == &self.false_value;
        }
        candidate.is_boolean()
            || value::loose_eq(candidate, &self.true_value)
            || value::loose_eq(candidate, &self.false_value)
    }
}

impl FromParams for BooleanValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = Self::new(options);
        if let Some(true_value) = params::take(params, "trueValue") {
            validator.true_value = true_value;
        }
        if let Some(false_value) = params::take(params, "falseValue") {
            validator.false_value = false_value;
        }
        if let Some(strict) = params::take_bool(params, "strict")? {
            validator.strict = strict;
        }
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for BooleanValidator {
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
        if !self.accepts(&current) {
            report(
                self,
                model,
                attribute,
                None,
                "{attribute} must be either {true} or {false}.",
                &[
                    ("true", value::display(&self.true_value)),
                    ("false", value::display(&self.false_value)),
                ],
            );
        }
        Ok(())
    }
}
