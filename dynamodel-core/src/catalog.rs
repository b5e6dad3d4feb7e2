// Validator catalogue: kind name -> factory

use crate::error::{ModelError, Result};
use crate::params::{Params, ensure_consumed};
use crate::rule::RuleSpec;
use crate::validator::{InlineValidator, Validator, ValidatorOptions};
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Factory building a validator from its common options and remaining parameters.
///
/// Factories remove the parameters they understand; anything left over is
/// reported as an unknown parameter.
pub type ValidatorFactory =
    Arc<dyn Fn(ValidatorOptions, &mut Params) -> Result<Arc<dyn Validator>> + Send + Sync>;

/// Catalogue of validator kinds.
///
/// Each model is given a catalogue when it is created; rule descriptors are
/// resolved against it.
#[derive(Clone, Default)]
pub struct ValidatorCatalog {
    factories: HashMap<String, ValidatorFactory>,
}

impl ValidatorCatalog {
    /// Create an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a kind, replacing any previous one
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(ValidatorOptions, &mut Params) -> Result<Arc<dyn Validator>> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(ValidatorOptions, &mut Params) -> Result<Arc<dyn Validator>> + Send + Sync + 'static,
    {
        self.register(kind, factory);
        self
    }

    /// Register a closure-backed kind.
    ///
    /// The closure returns `Err(template)` to report a finding.
    pub fn register_check<F>(&mut self, kind: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&Value) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        let kind = kind.into();
        let name = kind.clone();
        let check = Arc::new(check);
        self.register(kind, move |options, _params| {
            Ok(Arc::new(InlineValidator::from_shared(&name, options, check.clone())) as Arc<dyn Validator>)
        })
    }

    /// Make `alias` build the same validators as `kind`
    pub fn alias(&mut self, alias: impl Into<String>, kind: &str) -> Result<&mut Self> {
        let factory = self
            .factories
            .get(kind)
            .cloned()
            .ok_or_else(|| unknown_kind(kind))?;
        self.factories.insert(alias.into(), factory);
        Ok(self)
    }

    /// Check if a kind is known
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Known kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Merge another catalogue into this one; its kinds win on conflict
    pub fn extend(&mut self, other: ValidatorCatalog) {
        self.factories.extend(other.factories);
    }

    /// Build a validator from a rule
    pub fn build(&self, spec: RuleSpec) -> Result<Arc<dyn Validator>> {
        let RuleSpec {
            attributes,
            kind,
            mut params,
        } = spec;

        if attributes.is_empty() {
            return Err(ModelError::configuration(
                "a rule must specify both attribute names and validator type",
            ));
        }

        let factory = self.factories.get(&kind).ok_or_else(|| {
            warn!(kind = %kind, "Rule references an unknown validator kind");
            unknown_kind(&kind)
        })?;

        let options = ValidatorOptions::from_params(attributes, &mut params)?;
        let validator = factory(options, &mut params)?;
        ensure_consumed(&kind, &params)?;

        debug!(kind = %kind, attributes = ?validator.attributes(), "Built validator");
        Ok(validator)
    }
}

fn unknown_kind(kind: &str) -> ModelError {
    ModelError::configuration(format!("unknown validator kind '{}'", kind))
}

impl fmt::Debug for ValidatorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorCatalog")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ValidatorCatalog {
        let mut catalog = ValidatorCatalog::new();
        catalog.register_check("even", |value| match value.as_i64() {
            Some(n) if n % 2 == 0 => Ok(()),
            _ => Err("{attribute} must be even.".to_string()),
        });
        catalog
    }

    #[test]
    fn test_build_known_kind() {
        let validator = catalog()
            .build(RuleSpec::new("count, total", "even").on("update"))
            .unwrap();
        assert_eq!(validator.kind(), "even");
        assert_eq!(validator.attributes(), ["count", "total"]);
        assert!(validator.applies_to("update"));
        assert!(!validator.applies_to("default"));
    }

    #[test]
    fn test_unknown_kind() {
        let err = catalog().build(RuleSpec::new("count", "odd")).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("odd"));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = catalog()
            .build(RuleSpec::new("count", "even").param("max", 3))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_alias() {
        let mut catalog = catalog();
        catalog.alias("pair", "even").unwrap();
        assert!(catalog.contains("pair"));
        assert_eq!(catalog.kinds(), vec!["even", "pair"]);
        assert!(catalog.alias("x", "missing").is_err());
    }
}
