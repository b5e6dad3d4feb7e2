//! Runtime-extensible attribute storage.

use crate::value::Value;
use std::collections::HashMap;

/// Name to value mapping that remembers definition order.
///
/// Redefining an existing attribute overwrites its value but keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    order: Vec<String>,
    values: HashMap<String, Value>,
}

impl AttributeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Define an attribute, overwriting any previous value
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if !self.values.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.values.insert(name, value);
    }

    /// Remove an attribute, returning its value if it was defined
    pub fn undefine(&mut self, name: &str) -> Option<Value> {
        let value = self.values.remove(name)?;
        self.order.retain(|n| n != name);
        Some(value)
    }

    /// Get the current value of an attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a mutable reference to the value of an attribute
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Overwrite the value of a defined attribute.
    ///
    /// Returns the previous value, or hands `value` back unchanged when
    /// `name` is not defined so the caller can route it elsewhere.
    pub fn set(&mut self, name: &str, value: Value) -> Result<Value, Value> {
        match self.values.get_mut(name) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Check if an attribute is defined
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Attribute names in definition order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Number of defined attributes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no attribute is defined
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(name, value)` pairs in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.define(name, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_define_and_get() {
        let mut store = AttributeStore::new();
        store.define("name", json!("john"));
        store.define("email", Value::Null);

        assert!(store.has("name"));
        assert!(store.has("email"));
        assert_eq!(store.get("name"), Some(&json!("john")));
        assert_eq!(store.get("email"), Some(&Value::Null));
        assert_eq!(store.get("age"), None);
    }

    #[test]
    fn test_redefine_keeps_position() {
        let mut store = AttributeStore::new();
        store.define("a", json!(1));
        store.define("b", json!(2));
        store.define("a", json!(3));

        assert_eq!(store.names(), ["a", "b"]);
        assert_eq!(store.get("a"), Some(&json!(3)));
    }

    #[test]
    fn test_undefine() {
        let mut store = AttributeStore::new();
        store.define("a", json!(1));
        store.define("b", json!(2));

        assert_eq!(store.undefine("a"), Some(json!(1)));
        assert_eq!(store.undefine("a"), None);
        assert_eq!(store.names(), ["b"]);
    }

    #[test]
    fn test_set_only_defined() {
        let mut store = AttributeStore::new();
        store.define("a", json!(1));

        assert_eq!(store.set("a", json!(2)), Ok(json!(1)));
        assert_eq!(store.set("missing", json!(5)), Err(json!(5)));
        assert!(!store.has("missing"));
    }

    #[test]
    fn test_iter_in_order() {
        let store: AttributeStore = vec![("z", json!(1)), ("a", json!(2))].into_iter().collect();
        let pairs: Vec<_> = store.iter().collect();
        assert_eq!(pairs, vec![("z", &json!(1)), ("a", &json!(2))]);
    }
}
