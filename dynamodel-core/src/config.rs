// Model configuration

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};

/// Configuration applied to a model before its attributes are populated.
///
/// `scenario` is the declared property every model has; other entries are
/// written through the model's declared-property setter, so unknown keys
/// fail instead of silently creating attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Scenario to validate under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,

    /// Further declared properties
    #[serde(default, flatten)]
    pub properties: Map<String, Value>,
}

impl ModelConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scenario
    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Set a declared property
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize() {
        let config: ModelConfig =
            serde_json::from_value(json!({"scenario": "update", "strict": true})).unwrap();
        assert_eq!(config.scenario.as_deref(), Some("update"));
        assert_eq!(config.properties["strict"], true);
    }

    #[test]
    fn test_builder() {
        let config = ModelConfig::new().scenario("signup");
        assert_eq!(config.scenario.as_deref(), Some("signup"));
        assert!(config.properties.is_empty());
    }
}
