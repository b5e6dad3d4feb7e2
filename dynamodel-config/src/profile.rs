// Validation profiles

use crate::document::{FileFormat, ProfileDocument};
use crate::{ConfigError, Result};
use dynamodel_core::{
    AttributeData, DynamicModel, Model, ModelConfig, RuleSpec, ValidatorCatalog,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Model configuration and rule descriptors kept outside the code.
///
/// ```toml
/// [model]
/// scenario = "signup"
///
/// [[rules]]
/// attributes = "name"
/// kind = "length"
/// max = 64
///
/// [[rules]]
/// attributes = "email"
/// kind = "email"
/// ```
///
/// Rules may also be written positionally, e.g. `["name,email", "required"]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationProfile {
    /// Configuration applied to every model built from the profile
    #[serde(default)]
    pub model: ModelConfig,

    /// Rule descriptors, in the order they are added
    #[serde(default)]
    pub rules: Vec<Value>,
}

impl ValidationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model configuration
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.model = config;
        self
    }

    /// Append a rule descriptor
    pub fn rule(mut self, rule: impl Into<Value>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Parse a single-profile document
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        Self::from_document(&ProfileDocument::parse(content, format)?, None)
    }

    /// Parse one named profile out of a multi-profile document
    pub fn parse_named(content: &str, format: FileFormat, name: &str) -> Result<Self> {
        Self::from_document(&ProfileDocument::parse(content, format)?, Some(name))
    }

    /// Read a single profile from a `.json` or `.toml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from(path.as_ref(), None)
    }

    /// Read one named profile from a `.json` or `.toml` file
    pub fn load_named(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        Self::load_from(path.as_ref(), Some(name))
    }

    fn load_from(path: &Path, name: Option<&str>) -> Result<Self> {
        let profile = Self::from_document(&ProfileDocument::read(path)?, name)?;
        info!(
            path = %path.display(),
            profile = name.unwrap_or("-"),
            rules = profile.rules.len(),
            "Loaded validation profile"
        );
        Ok(profile)
    }

    /// Select and convert a profile of a parsed document
    pub fn from_document(document: &ProfileDocument, name: Option<&str>) -> Result<Self> {
        Self::from_value(document.select(name)?)
    }

    /// Convert an already parsed document
    pub fn from_value(document: Value) -> Result<Self> {
        serde_json::from_value(document)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Check every rule against a catalogue without building a model
    pub fn verify(&self, catalog: &ValidatorCatalog) -> Result<()> {
        for rule in &self.rules {
            catalog.build(RuleSpec::from_value(rule)?)?;
        }
        Ok(())
    }

    /// Create a configured model carrying the profile's rules
    pub fn build(
        &self,
        data: impl Into<AttributeData>,
        catalog: Arc<ValidatorCatalog>,
    ) -> Result<DynamicModel> {
        let mut model = DynamicModel::with_config(data, self.model.clone(), catalog)?;
        for rule in &self.rules {
            model.add_rule(rule.clone())?;
        }
        debug!(rules = self.rules.len(), "Built model from profile");
        Ok(model)
    }

    /// Build a model and validate it when the profile has rules
    pub fn validate(
        &self,
        data: impl Into<AttributeData>,
        catalog: Arc<ValidatorCatalog>,
    ) -> Result<DynamicModel> {
        let mut model = self.build(data, catalog)?;
        if !self.rules.is_empty() {
            model.validate()?;
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> ValidatorCatalog {
        let mut catalog = ValidatorCatalog::new();
        catalog.register_check("present", |value| {
            if value.is_null() {
                Err("{attribute} is missing.".to_string())
            } else {
                Ok(())
            }
        });
        catalog
    }

    #[test]
    fn test_from_json() {
        let profile = ValidationProfile::parse(
            r#"{"model": {"scenario": "signup"}, "rules": [["name", "present"]]}"#,
            FileFormat::Json,
        )
        .unwrap();
        assert_eq!(profile.model.scenario.as_deref(), Some("signup"));
        assert_eq!(profile.rules, vec![json!(["name", "present"])]);
    }

    #[test]
    fn test_named_profile() {
        let content = r#"{
            "signup": {"rules": [["name", "present"]]},
            "contact": {"model": {"scenario": "contact"}, "rules": []}
        }"#;
        let profile = ValidationProfile::parse_named(content, FileFormat::Json, "contact").unwrap();
        assert_eq!(profile.model.scenario.as_deref(), Some("contact"));
        assert!(profile.rules.is_empty());

        assert!(ValidationProfile::parse(content, FileFormat::Json).is_err());
        let err = ValidationProfile::parse_named(content, FileFormat::Json, "other").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { ref name, .. } if name == "other"));
    }

    #[test]
    fn test_defaults() {
        let profile = ValidationProfile::parse("", FileFormat::Toml).unwrap();
        assert_eq!(profile, ValidationProfile::new());
    }

    #[test]
    fn test_wrong_shape() {
        let err = ValidationProfile::parse(r#"{"rules": 5}"#, FileFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::DeserializationError(_)));
    }

    #[test]
    fn test_verify() {
        let catalog = catalog();
        assert!(ValidationProfile::new().rule(json!(["a", "present"])).verify(&catalog).is_ok());

        let err = ValidationProfile::new()
            .rule(json!(["a", "absent"]))
            .verify(&catalog)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Model(ref e) if e.is_configuration()));
    }

    #[test]
    fn test_validate() {
        let profile = ValidationProfile::new()
            .with_config(ModelConfig::new().scenario("signup"))
            .rule(json!(["name", "present"]));

        let model = profile.validate(["name"], Arc::new(catalog())).unwrap();
        assert_eq!(model.scenario(), "signup");
        assert_eq!(model.errors().first("name"), Some("Name is missing."));
    }
}
