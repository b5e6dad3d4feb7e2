// dynamodel - ad-hoc data validation with dynamic attribute models
//
// This library validates loose data against rules given at the call site,
// without declaring a model type first.

//! # Quick start
//!
//! ```
//! use dynamodel::prelude::*;
//! use serde_json::json;
//!
//! let model = dynamodel::validate_data(
//!     [("name", "testname"), ("email", "test.email.com")],
//!     [
//!         json!(["name", "length", {"max": 4}]),
//!         json!(["email", "email"]),
//!     ],
//! )
//! .unwrap();
//!
//! assert!(model.has_errors(Some("name")));
//! assert_eq!(
//!     model.errors().first("email"),
//!     Some("Email is not a valid email address.")
//! );
//! ```
//!
//! Models built through this crate resolve rule kinds against the built-in
//! catalogue. Use [`new_model_with`] or the core constructors to supply a
//! catalogue with custom kinds.

use std::sync::{Arc, OnceLock};

// Re-export core functionality
pub use dynamodel_core::*;

// Re-export the validator kinds
pub use dynamodel_validators as validators;
pub use dynamodel_validators::{builtin_catalog, register_builtins};

// Re-export optional crates
#[cfg(feature = "config")]
pub use dynamodel_config;

static BUILTIN: OnceLock<Arc<ValidatorCatalog>> = OnceLock::new();

/// Shared catalogue holding the built-in kinds
pub fn default_catalog() -> Arc<ValidatorCatalog> {
    BUILTIN
        .get_or_init(|| Arc::new(builtin_catalog()))
        .clone()
}

/// Create a model with the built-in kinds
pub fn new_model(data: impl Into<AttributeData>) -> DynamicModel {
    DynamicModel::new(data, default_catalog())
}

/// Create a model whose catalogue extends the built-in kinds.
///
/// `extend` receives a copy of the built-in catalogue to register custom
/// kinds into.
pub fn new_model_with<F>(data: impl Into<AttributeData>, extend: F) -> DynamicModel
where
    F: FnOnce(&mut ValidatorCatalog),
{
    let mut catalog = builtin_catalog();
    extend(&mut catalog);
    DynamicModel::new(data, Arc::new(catalog))
}

/// Validate data against rules using the built-in kinds.
///
/// The validation pass only runs when at least one rule is given.
pub fn validate_data<I, R>(data: impl Into<AttributeData>, rules: I) -> Result<DynamicModel>
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    DynamicModel::validate_data(data, rules, default_catalog())
}

pub mod prelude {
    pub use crate::{
        AttributeData, DynamicModel, Model, ModelConfig, ModelError, ModelErrors, Rule, RuleSpec,
        Validator, ValidatorCatalog, ValidatorOptions, Value, default_catalog, new_model,
        new_model_with, validate_data,
    };

    #[cfg(feature = "config")]
    pub use dynamodel_config::{FileFormat, ValidationProfile};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_shared() {
        let a = default_catalog();
        let b = default_catalog();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.contains("required"));
    }

    #[test]
    fn test_new_model_with_custom_kind() {
        let mut model = new_model_with([("n", 3)], |catalog| {
            catalog.register_check("even", |value| match value.as_i64() {
                Some(n) if n % 2 == 0 => Ok(()),
                _ => Err("{attribute} must be even.".to_string()),
            });
        });
        model.add_rule(RuleSpec::new("n", "even")).unwrap();
        model.add_rule(RuleSpec::new("n", "required")).unwrap();
        assert!(!model.validate().unwrap());
        assert_eq!(model.attribute_errors("n"), vec!["N must be even.".to_string()]);
    }
}
