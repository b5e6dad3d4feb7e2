//! Dynamic model: attributes defined at runtime, rules supplied at the call site.
//!
//! ```
//! use dynamodel_core::{DynamicModel, Model, ValidatorCatalog};
//! use std::sync::Arc;
//!
//! let mut catalog = ValidatorCatalog::new();
//! catalog.register_check("present", |value| {
//!     if value.is_null() { Err("{attribute} is missing.".into()) } else { Ok(()) }
//! });
//!
//! let mut model = DynamicModel::new(["name", "email"], Arc::new(catalog));
//! model.set("name", "John".into()).unwrap();
//! model
//!     .add_rule(serde_json::json!(["name, email", "present"]))
//!     .unwrap();
//!
//! assert!(!model.validate().unwrap());
//! assert_eq!(model.errors().first("email"), Some("Email is missing."));
//! ```

use crate::catalog::ValidatorCatalog;
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::errors::ModelErrors;
use crate::model::{DEFAULT_SCENARIO, Model};
use crate::registry::ValidatorRegistry;
use crate::rule::{Rule, RuleSpec};
use crate::store::AttributeStore;
use crate::validator::Validator;
use crate::value::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Initial attributes of a dynamic model.
///
/// Named values keep their value; bare names start out as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeData(Vec<(String, Value)>);

impl AttributeData {
    /// Create empty initial data
    pub fn new() -> Self {
        Self::default()
    }

    /// Bare attribute names, each initialized to null
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(|n| (n.into(), Value::Null)).collect())
    }

    /// Add a named value
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in order
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.0
    }
}

impl From<Map<String, Value>> for AttributeData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl From<Vec<(String, Value)>> for AttributeData {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        Self(pairs)
    }
}

impl From<Vec<String>> for AttributeData {
    fn from(names: Vec<String>) -> Self {
        Self::names(names)
    }
}

impl<const N: usize> From<[&str; N]> for AttributeData {
    fn from(names: [&str; N]) -> Self {
        Self::names(names)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AttributeData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Value> for AttributeData {
    type Error = ModelError;

    /// Objects give named values, arrays of strings give bare names
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(map.into()),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) => Ok((name, Value::Null)),
                    other => Err(ModelError::configuration(format!(
                        "attribute names must be strings, got {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self),
            other => Err(ModelError::configuration(format!(
                "attribute data must be an object or a list of names, got {}",
                other
            ))),
        }
    }
}

/// Model whose attributes are defined at runtime.
///
/// Reads and writes go to the dynamic attributes first and fall back to the
/// declared `scenario` property; any other name fails with
/// [`ModelError::AttributeNotFound`].
#[derive(Debug)]
pub struct DynamicModel {
    attributes: AttributeStore,
    validators: ValidatorRegistry,
    errors: ModelErrors,
    scenario: String,
    catalog: Arc<ValidatorCatalog>,
}

impl DynamicModel {
    /// Name used in error messages
    pub const NAME: &'static str = "DynamicModel";

    /// Create a model with initial attributes
    pub fn new(data: impl Into<AttributeData>, catalog: Arc<ValidatorCatalog>) -> Self {
        let mut model = Self::empty(catalog);
        model.populate(data.into());
        model
    }

    /// Create a model without attributes
    pub fn empty(catalog: Arc<ValidatorCatalog>) -> Self {
        Self {
            attributes: AttributeStore::new(),
            validators: ValidatorRegistry::new(),
            errors: ModelErrors::new(),
            scenario: DEFAULT_SCENARIO.to_string(),
            catalog,
        }
    }

    /// Create a model from a JSON object or a JSON list of names
    pub fn from_value(data: Value, catalog: Arc<ValidatorCatalog>) -> Result<Self> {
        Ok(Self::new(AttributeData::try_from(data)?, catalog))
    }

    /// Create a model, applying configuration before the attributes are defined
    pub fn with_config(
        data: impl Into<AttributeData>,
        config: ModelConfig,
        catalog: Arc<ValidatorCatalog>,
    ) -> Result<Self> {
        let mut model = Self::empty(catalog);
        model.apply_config(config)?;
        model.populate(data.into());
        Ok(model)
    }

    /// Validate data against rules in one call.
    ///
    /// The validation pass only runs when at least one rule is given; the
    /// model is returned either way so attributes and errors can be inspected.
    pub fn validate_data<I, R>(
        data: impl Into<AttributeData>,
        rules: I,
        catalog: Arc<ValidatorCatalog>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        let mut model = Self::new(data, catalog);
        let mut added = 0usize;
        for rule in rules {
            model.add_rule(rule)?;
            added += 1;
        }
        if added > 0 {
            model.validate()?;
        }
        Ok(model)
    }

    fn populate(&mut self, data: AttributeData) {
        for (name, value) in data.into_pairs() {
            self.attributes.define(name, value);
        }
    }

    fn apply_config(&mut self, config: ModelConfig) -> Result<()> {
        if let Some(scenario) = config.scenario {
            self.scenario = scenario;
        }
        for (name, value) in config.properties {
            self.set_declared(&name, value)?;
        }
        Ok(())
    }

    fn get_declared(&self, name: &str) -> Option<Value> {
        match name {
            "scenario" => Some(Value::String(self.scenario.clone())),
            _ => None,
        }
    }

    fn set_declared(&mut self, name: &str, value: Value) -> Result<()> {
        match (name, value) {
            ("scenario", Value::String(scenario)) => {
                self.scenario = scenario;
                Ok(())
            }
            ("scenario", Value::Null) => {
                self.scenario = DEFAULT_SCENARIO.to_string();
                Ok(())
            }
            ("scenario", other) => Err(ModelError::configuration(format!(
                "scenario must be a string, got {}",
                other
            ))),
            (name, _) => Err(ModelError::attribute_not_found(Self::NAME, name)),
        }
    }

    /// Define an attribute, overwriting any previous value
    pub fn define_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        debug!(attribute = %name, "Defining dynamic attribute");
        self.attributes.define(name, value.into());
        self
    }

    /// Remove a dynamic attribute; does nothing when it is not defined
    pub fn undefine_attribute(&mut self, name: &str) -> Option<Value> {
        self.attributes.undefine(name)
    }

    /// Check if a dynamic attribute is defined
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    /// Check if a name resolves to a non-null value
    pub fn is_set(&self, name: &str) -> bool {
        match self.attributes.get(name) {
            Some(value) => !value.is_null(),
            None => self.get_declared(name).is_some_and(|v| !v.is_null()),
        }
    }

    /// Remove a dynamic attribute, or reset a declared property.
    ///
    /// Fails when the name is neither.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.attributes.undefine(name).is_some() {
            return Ok(());
        }
        self.set_declared(name, Value::Null)
    }

    /// Add a validation rule.
    ///
    /// Accepts a ready validator, a [`RuleSpec`] or a loosely written JSON
    /// descriptor. Malformed rules and unknown kinds fail immediately.
    pub fn add_rule(&mut self, rule: impl Into<Rule>) -> Result<&mut Self> {
        let validator = match rule.into() {
            Rule::Validator(validator) => validator,
            Rule::Spec(spec) => self.catalog.build(spec)?,
            Rule::Descriptor(value) => self.catalog.build(RuleSpec::from_value(&value)?)?,
        };
        debug!(
            kind = validator.kind(),
            attributes = ?validator.attributes(),
            "Added validation rule"
        );
        self.validators.add(validator);
        Ok(self)
    }

    /// Remove every rule
    pub fn clear_rules(&mut self) -> &mut Self {
        self.validators.clear();
        self
    }

    /// Every rule, in the order added
    pub fn rules(&self) -> &[Arc<dyn Validator>] {
        self.validators.all()
    }

    /// Rules active in the current scenario, optionally bound to one attribute
    pub fn get_validators(&self, attribute: Option<&str>) -> Vec<Arc<dyn Validator>> {
        self.validators.applicable_to(attribute, &self.scenario)
    }

    /// Switch scenario
    pub fn set_scenario(&mut self, scenario: impl Into<String>) -> &mut Self {
        self.scenario = scenario.into();
        self
    }

    /// Dynamic attribute storage
    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    /// Catalogue used to resolve rule kinds
    pub fn catalog(&self) -> &ValidatorCatalog {
        &self.catalog
    }
}

impl Model for DynamicModel {
    fn model_name(&self) -> &str {
        Self::NAME
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.names().to_vec()
    }

    fn get(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.attributes.get(name) {
            return Ok(value.clone());
        }
        self.get_declared(name)
            .ok_or_else(|| ModelError::attribute_not_found(Self::NAME, name))
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match self.attributes.set(name, value) {
            Ok(_) => Ok(()),
            Err(value) => self.set_declared(name, value),
        }
    }

    fn scenario(&self) -> &str {
        &self.scenario
    }

    fn errors(&self) -> &ModelErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ModelErrors {
        &mut self.errors
    }

    fn validators(&self) -> Vec<Arc<dyn Validator>> {
        self.validators.all().to_vec()
    }

    fn active_validators(&self, attribute: Option<&str>) -> Vec<Arc<dyn Validator>> {
        self.get_validators(attribute)
    }
}
