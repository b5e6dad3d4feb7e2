// Ordered validator registry

use crate::validator::Validator;
use std::sync::Arc;

/// Insertion-ordered collection of validators.
///
/// Order is significant: validators run, and report, in the order they
/// were added.
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    validators: Vec<Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator
    pub fn add(&mut self, validator: Arc<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Every validator, in insertion order
    pub fn all(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Validators active in `scenario`, optionally bound to `attribute`
    pub fn applicable_to(&self, attribute: Option<&str>, scenario: &str) -> Vec<Arc<dyn Validator>> {
        self.validators
            .iter()
            .filter(|v| v.applies_to(scenario))
            .filter(|v| attribute.is_none_or(|a| v.governs(a)))
            .cloned()
            .collect()
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Remove every validator
    pub fn clear(&mut self) {
        self.validators.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{InlineValidator, ValidatorOptions};

    fn inline(attributes: &[&str], on: &[&str]) -> Arc<dyn Validator> {
        Arc::new(InlineValidator::new(
            "check",
            ValidatorOptions::new(attributes.iter().copied()).on(on.iter().copied()),
            |_| Ok(()),
        ))
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut registry = ValidatorRegistry::new();
        let v = inline(&["name"], &[]);
        registry.add(v.clone());
        registry.add(v);
        registry.add(inline(&["email"], &[]));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.all()[2].attributes(), ["email"]);
    }

    #[test]
    fn test_applicable_to_scenario() {
        let mut registry = ValidatorRegistry::new();
        registry.add(inline(&["name"], &[]));
        registry.add(inline(&["name"], &["update"]));

        assert_eq!(registry.applicable_to(None, "default").len(), 1);
        assert_eq!(registry.applicable_to(None, "update").len(), 2);
    }

    #[test]
    fn test_applicable_to_attribute() {
        let mut registry = ValidatorRegistry::new();
        registry.add(inline(&["name", "email"], &[]));
        registry.add(inline(&["email"], &[]));
        registry.add(inline(&["age"], &[]));

        assert_eq!(registry.applicable_to(Some("email"), "default").len(), 2);
        assert_eq!(registry.applicable_to(Some("name"), "default").len(), 1);
        assert!(registry.applicable_to(Some("zip"), "default").is_empty());
    }
}
