//! Base model contract and the validation driver.
//!
//! [`Model`] supplies what every validatable model shares: an error store,
//! a scenario, attribute access, mass assignment and the validation pass.
//! Concrete models only provide storage and their validator list.

use crate::error::Result;
use crate::errors::ModelErrors;
use crate::validator::Validator;
use crate::value::{Map, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// Scenario used when none is configured
pub const DEFAULT_SCENARIO: &str = "default";

/// Kind name of validators that make an attribute required
pub const REQUIRED_KIND: &str = "required";

/// Kind name of validators that mark attributes unsafe for mass assignment
pub const UNSAFE_KIND: &str = "unsafe";

/// Generate a human-readable label from an attribute name.
///
/// `first_name`, `first-name` and `firstName` all become `First Name`.
pub fn generate_label(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev_upper = false;
    for c in name.chars() {
        let upper = c.is_uppercase();
        if upper && !prev_upper {
            spaced.push(' ');
        }
        prev_upper = upper;
        match c {
            '-' | '_' | '.' => spaced.push(' '),
            c => spaced.extend(c.to_lowercase()),
        }
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A validatable model
pub trait Model {
    /// Name used in error messages
    fn model_name(&self) -> &str {
        "Model"
    }

    /// Names of the model's attributes, in order
    fn attribute_names(&self) -> Vec<String>;

    /// Read an attribute or declared property
    fn get(&self, name: &str) -> Result<Value>;

    /// Write an attribute or declared property
    fn set(&mut self, name: &str, value: Value) -> Result<()>;

    /// Current scenario
    fn scenario(&self) -> &str;

    /// Error store
    fn errors(&self) -> &ModelErrors;

    /// Mutable error store
    fn errors_mut(&mut self) -> &mut ModelErrors;

    /// Every validator of the model, in registration order
    fn validators(&self) -> Vec<Arc<dyn Validator>>;

    /// Validators active in the current scenario, optionally bound to one attribute
    fn active_validators(&self, attribute: Option<&str>) -> Vec<Arc<dyn Validator>> {
        let scenario = self.scenario();
        self.validators()
            .into_iter()
            .filter(|v| v.applies_to(scenario))
            .filter(|v| attribute.is_none_or(|a| v.governs(a)))
            .collect()
    }

    /// Label of an attribute, used in messages
    fn attribute_label(&self, name: &str) -> String {
        generate_label(name)
    }

    /// Record a finding for an attribute
    fn add_error(&mut self, attribute: &str, message: String) {
        self.errors_mut().add(attribute, message);
    }

    /// Check for findings, on one attribute or on any
    fn has_errors(&self, attribute: Option<&str>) -> bool {
        match attribute {
            Some(attribute) => self.errors().has(attribute),
            None => !self.errors().is_empty(),
        }
    }

    /// Messages recorded for an attribute
    fn attribute_errors(&self, attribute: &str) -> Vec<String> {
        self.errors()
            .get(attribute)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Remove findings, for one attribute or for all
    fn clear_errors(&mut self, attribute: Option<&str>) {
        match attribute {
            Some(attribute) => self.errors_mut().clear_attribute(attribute),
            None => self.errors_mut().clear(),
        }
    }

    /// Whether an active `required` validator governs the attribute
    fn is_attribute_required(&self, attribute: &str) -> bool {
        self.active_validators(Some(attribute))
            .iter()
            .any(|v| v.kind() == REQUIRED_KIND)
    }

    /// Attributes that may be mass-assigned in the current scenario
    fn safe_attribute_names(&self) -> Vec<String> {
        let mut safe: Vec<String> = Vec::new();
        let mut unsafe_names: Vec<String> = Vec::new();
        for validator in self.active_validators(None) {
            let target = if validator.kind() == UNSAFE_KIND || !validator.is_safe() {
                &mut unsafe_names
            } else {
                &mut safe
            };
            for name in validator.attributes() {
                if !target.contains(name) {
                    target.push(name.clone());
                }
            }
        }
        safe.retain(|name| !unsafe_names.contains(name));
        safe
    }

    /// Whether an attribute may be mass-assigned in the current scenario
    fn is_attribute_safe(&self, attribute: &str) -> bool {
        self.safe_attribute_names().iter().any(|n| n == attribute)
    }

    /// Read several attributes into a JSON object (all attributes when `names` is `None`)
    fn get_attributes(&self, names: Option<&[String]>) -> Result<Map<String, Value>> {
        let names = match names {
            Some(names) => names.to_vec(),
            None => self.attribute_names(),
        };
        let mut values = Map::new();
        for name in names {
            let value = self.get(&name)?;
            values.insert(name, value);
        }
        Ok(values)
    }

    /// Mass-assign attribute values.
    ///
    /// With `safe_only`, names that are not safe in the current scenario are
    /// skipped; otherwise every name is written and unknown names fail.
    fn set_attributes(&mut self, values: Map<String, Value>, safe_only: bool) -> Result<()> {
        let safe = if safe_only {
            self.safe_attribute_names()
        } else {
            Vec::new()
        };
        for (name, value) in values {
            if safe_only && !safe.contains(&name) {
                debug!(
                    model = self.model_name(),
                    attribute = %name,
                    scenario = self.scenario(),
                    "Skipping unsafe attribute during mass assignment"
                );
                continue;
            }
            self.set(&name, value)?;
        }
        Ok(())
    }

    /// Reset attributes to null (all attributes when `names` is `None`)
    fn unset_attributes(&mut self, names: Option<&[String]>) -> Result<()> {
        let names = match names {
            Some(names) => names.to_vec(),
            None => self.attribute_names(),
        };
        for name in names {
            self.set(&name, Value::Null)?;
        }
        Ok(())
    }

    /// Validate every attribute, discarding earlier findings.
    ///
    /// Returns `true` when no errors were recorded.
    fn validate(&mut self) -> Result<bool>
    where
        Self: Sized,
    {
        validate_model(self, None, true)
    }

    /// Validate a subset of attributes
    fn validate_attributes(&mut self, attributes: &[String], clear_errors: bool) -> Result<bool>
    where
        Self: Sized,
    {
        validate_model(self, Some(attributes), clear_errors)
    }
}

/// Run a validation pass over a model.
///
/// Active validators run in registration order. With `clear_errors` the
/// error store is emptied first, so repeated passes never accumulate.
pub fn validate_model(
    model: &mut dyn Model,
    attributes: Option<&[String]>,
    clear_errors: bool,
) -> Result<bool> {
    if clear_errors {
        model.clear_errors(None);
    }

    let validators = model.active_validators(None);
    debug!(
        model = model.model_name(),
        scenario = model.scenario(),
        validators = validators.len(),
        "Starting validation pass"
    );

    for validator in validators {
        trace!(
            kind = validator.kind(),
            attributes = ?validator.attributes(),
            "Running validator"
        );
        validator.validate(&mut *model, attributes)?;
    }

    let errors = model.errors().len();
    debug!(model = model.model_name(), errors, "Validation pass finished");
    Ok(errors == 0)
}
