//! Dynamic attribute model and rule-based validation engine.
//!
//! A [`DynamicModel`] holds named values that are not declared in any
//! schema, together with validation rules supplied at the call site.
//! Rules are resolved against a [`ValidatorCatalog`] that maps kind names
//! to validator factories; validation findings are collected per attribute
//! in [`ModelErrors`].
//!
//! Configuration mistakes (malformed rules, unknown kinds, unknown
//! attributes) are reported as [`ModelError`]. Failed checks are data, not
//! errors.
//!
//! # Examples
//!
//! ```
//! use dynamodel_core::{DynamicModel, Model, RuleSpec, ValidatorCatalog};
//! use std::sync::Arc;
//!
//! let mut catalog = ValidatorCatalog::new();
//! catalog.register_check("short", |value| match value.as_str() {
//!     Some(s) if s.len() <= 4 => Ok(()),
//!     _ => Err("{attribute} is too long.".into()),
//! });
//!
//! let model = DynamicModel::validate_data(
//!     [("name", "testname")],
//!     [RuleSpec::new("name", "short")],
//!     Arc::new(catalog),
//! )
//! .unwrap();
//!
//! assert!(model.has_errors(Some("name")));
//! assert_eq!(model.errors().first("name"), Some("Name is too long."));
//! ```

pub mod catalog;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod errors;
pub mod logging;
pub mod model;
pub mod params;
pub mod registry;
pub mod rule;
pub mod store;
pub mod validator;
pub mod value;

pub use catalog::{ValidatorCatalog, ValidatorFactory};
pub use config::ModelConfig;
pub use dynamic::{AttributeData, DynamicModel};
pub use error::{ModelError, Result};
pub use errors::{ErrorRecord, ModelErrors};
pub use model::{DEFAULT_SCENARIO, Model, generate_label, validate_model};
pub use params::Params;
pub use registry::ValidatorRegistry;
pub use rule::{Rule, RuleSpec};
pub use store::AttributeStore;
pub use validator::{InlineValidator, Validator, ValidatorOptions, format_message};
pub use value::Value;
