// Error types for model configuration and attribute access

use thiserror::Error;

/// Errors raised by the model itself.
///
/// Validation findings are not errors: they are recorded in
/// [`ModelErrors`](crate::ModelErrors) and inspected after a validation pass.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A rule descriptor is malformed or names an unknown validator kind
    #[error("Invalid validation rule: {0}")]
    Configuration(String),

    /// Read or write of a name that is neither a dynamic attribute nor a declared property
    #[error("Property \"{model}.{name}\" is not defined")]
    AttributeNotFound { model: String, name: String },

    /// A validator failed while checking a value
    #[error("Validator '{kind}' failed: {message}")]
    Validator { kind: String, message: String },
}

impl ModelError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an attribute-not-found error
    pub fn attribute_not_found(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            model: model.into(),
            name: name.into(),
        }
    }

    /// Create a validator failure
    pub fn validator(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validator {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Check whether this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check whether this is an attribute-not-found error
    pub fn is_attribute_not_found(&self) -> bool {
        matches!(self, Self::AttributeNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ModelError::attribute_not_found("DynamicModel", "age");
        assert_eq!(err.to_string(), "Property \"DynamicModel.age\" is not defined");
        assert!(err.is_attribute_not_found());

        let err = ModelError::configuration("unknown validator kind 'nope'");
        assert_eq!(
            err.to_string(),
            "Invalid validation rule: unknown validator kind 'nope'"
        );
        assert!(err.is_configuration());
    }
}
