//! Built-in validator kinds.
//!
//! Every kind is a struct implementing [`Validator`], constructible either
//! directly through its builder methods or from rule parameters through the
//! catalogue returned by [`builtin_catalog`].
//!
//! | kind | validator | aliases |
//! |------|-----------|---------|
//! | `required` | [`RequiredValidator`] | |
//! | `length` | [`LengthValidator`] | `string` |
//! | `email` | [`EmailValidator`] | |
//! | `url` | [`UrlValidator`] | |
//! | `match` | [`MatchValidator`] | |
//! | `numerical` | [`NumberValidator`] | `number`, `double`, `integer` |
//! | `in` | [`RangeValidator`] | `range` |
//! | `compare` | [`CompareValidator`] | |
//! | `boolean` | [`BooleanValidator`] | |
//! | `type` | [`TypeValidator`] | |
//! | `default` | [`DefaultValueValidator`] | |
//! | `filter` | [`FilterValidator`] | `trim` |
//! | `safe` | [`SafeValidator`] | |
//! | `unsafe` | [`UnsafeValidator`] | |
//!
//! # Examples
//!
//! ```
//! use dynamodel_core::{DynamicModel, Model, RuleSpec};
//! use dynamodel_validators::builtin_catalog;
//! use std::sync::Arc;
//!
//! let model = DynamicModel::validate_data(
//!     [("email", "test.email.com")],
//!     [RuleSpec::new("email", "email")],
//!     Arc::new(builtin_catalog()),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     model.errors().first("email"),
//!     Some("Email is not a valid email address.")
//! );
//! ```

pub mod assign;
pub mod compare;
pub mod number;
pub mod required;
pub mod string;
pub mod type_check;

pub use assign::{DefaultValueValidator, Filter, FilterValidator, SafeValidator, UnsafeValidator};
pub use compare::{BooleanValidator, CompareOperator, CompareValidator, RangeValidator};
pub use number::NumberValidator;
pub use required::RequiredValidator;
pub use string::{EmailValidator, LengthValidator, MatchValidator, UrlValidator};
pub use type_check::{TypeValidator, ValueType};

use dynamodel_core::{Model, Params, Result, Validator, ValidatorCatalog, ValidatorOptions, format_message};
use std::sync::Arc;

/// Construction of a validator from rule parameters.
///
/// Implementations remove every parameter they understand from `params`.
pub trait FromParams: Sized {
    /// Build the validator
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self>;
}

fn register<V>(catalog: &mut ValidatorCatalog, kind: &str)
where
    V: Validator + FromParams + 'static,
{
    catalog.register(kind, |options, params| {
        Ok(Arc::new(V::from_params(options, params)?) as Arc<dyn Validator>)
    });
}

/// Register the built-in kinds and their aliases into a catalogue
pub fn register_builtins(catalog: &mut ValidatorCatalog) {
    register::<RequiredValidator>(catalog, "required");
    register::<LengthValidator>(catalog, "length");
    register::<LengthValidator>(catalog, "string");
    register::<EmailValidator>(catalog, "email");
    register::<UrlValidator>(catalog, "url");
    register::<MatchValidator>(catalog, "match");
    register::<NumberValidator>(catalog, "numerical");
    register::<NumberValidator>(catalog, "number");
    register::<NumberValidator>(catalog, "double");
    register::<RangeValidator>(catalog, "in");
    register::<RangeValidator>(catalog, "range");
    register::<CompareValidator>(catalog, "compare");
    register::<BooleanValidator>(catalog, "boolean");
    register::<TypeValidator>(catalog, "type");
    register::<DefaultValueValidator>(catalog, "default");
    register::<FilterValidator>(catalog, "filter");
    register::<SafeValidator>(catalog, "safe");
    register::<UnsafeValidator>(catalog, "unsafe");

    catalog.register("integer", |options, params| {
        let validator = NumberValidator::from_params(options, params)?.integer_only(true);
        Ok(Arc::new(validator) as Arc<dyn Validator>)
    });
    catalog.register("trim", |options, params| {
        let validator = FilterValidator::from_params_or(options, params, Filter::Trim)?;
        Ok(Arc::new(validator) as Arc<dyn Validator>)
    });
}

/// A catalogue holding every built-in kind
pub fn builtin_catalog() -> ValidatorCatalog {
    let mut catalog = ValidatorCatalog::new();
    register_builtins(&mut catalog);
    catalog
}

/// Record a finding using a kind-specific message override when one is set.
///
/// Precedence: `specific`, then the rule's `message`, then `default`.
pub(crate) fn report(
    validator: &dyn Validator,
    model: &mut dyn Model,
    attribute: &str,
    specific: Option<&str>,
    default: &str,
    params: &[(&str, String)],
) {
    match specific {
        Some(template) => {
            let mut all = vec![("attribute", model.attribute_label(attribute))];
            all.extend(params.iter().cloned());
            model.add_error(attribute, format_message(template, &all));
        }
        None => validator.add_error(model, attribute, default, params),
    }
}

#[cfg(test)]
pub(crate) fn run<V: Validator + 'static>(data: serde_json::Value, validator: V) -> dynamodel_core::DynamicModel {
    let mut model =
        dynamodel_core::DynamicModel::from_value(data, Arc::new(ValidatorCatalog::new())).unwrap();
    model.add_rule(Arc::new(validator) as Arc<dyn Validator>).unwrap();
    dynamodel_core::validate_model(&mut model, None, true).unwrap();
    model
}
