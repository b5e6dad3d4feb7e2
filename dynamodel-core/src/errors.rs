// Per-attribute validation findings

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single finding produced by a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Attribute the finding is attached to
    pub attribute: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorRecord {
    /// Create a new error record
    pub fn new(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.message)
    }
}

/// Error store of a model.
///
/// Records are kept in the order validators produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelErrors {
    records: Vec<ErrorRecord>,
}

impl ModelErrors {
    /// Create an empty error store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for an attribute
    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.records.push(ErrorRecord::new(attribute, message));
    }

    /// Check if there are no errors at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of recorded errors
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if an attribute has errors
    pub fn has(&self, attribute: &str) -> bool {
        self.records.iter().any(|r| r.attribute == attribute)
    }

    /// Get the messages recorded for an attribute
    pub fn get(&self, attribute: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.attribute == attribute)
            .map(|r| r.message.as_str())
            .collect()
    }

    /// Get the first message recorded for an attribute
    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.attribute == attribute)
            .map(|r| r.message.as_str())
    }

    /// Attributes that have errors, in order of their first error
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.attribute.as_str()) {
                names.push(&record.attribute);
            }
        }
        names
    }

    /// All records, in production order
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Remove every error
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Remove the errors of one attribute
    pub fn clear_attribute(&mut self, attribute: &str) {
        self.records.retain(|r| r.attribute != attribute);
    }

    /// Convert to JSON, grouping messages by attribute
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for attribute in self.attributes() {
            map.insert(attribute.to_string(), serde_json::json!(self.get(attribute)));
        }
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for ModelErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl From<Vec<ErrorRecord>> for ModelErrors {
    fn from(records: Vec<ErrorRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut errors = ModelErrors::new();
        assert!(errors.is_empty());

        errors.add("name", "Name is too long");
        errors.add("email", "Email is invalid");
        errors.add("name", "Name is invalid");

        assert_eq!(errors.len(), 3);
        assert!(errors.has("name"));
        assert!(!errors.has("age"));
        assert_eq!(errors.get("name"), vec!["Name is too long", "Name is invalid"]);
        assert_eq!(errors.first("email"), Some("Email is invalid"));
        assert_eq!(errors.attributes(), vec!["name", "email"]);
    }

    #[test]
    fn test_clear_attribute() {
        let mut errors = ModelErrors::new();
        errors.add("name", "bad");
        errors.add("email", "bad");

        errors.clear_attribute("name");
        assert!(!errors.has("name"));
        assert!(errors.has("email"));

        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_to_json() {
        let mut errors = ModelErrors::new();
        errors.add("email", "Email is not a valid email address.");

        let json = errors.to_json();
        assert_eq!(json["email"][0], "Email is not a valid email address.");
    }

    #[test]
    fn test_to_json_keeps_attribute_order() {
        let mut errors = ModelErrors::new();
        errors.add("zeta", "Zeta cannot be blank.");
        errors.add("alpha", "Alpha cannot be blank.");

        let json = errors.to_json();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }
}
