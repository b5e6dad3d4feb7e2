// Profile documents

use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Keys a single profile may carry at its root
const PROFILE_KEYS: [&str; 2] = ["model", "rules"];

/// Supported profile file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Format of a profile file, from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).ok_or_else(|| {
            ConfigError::LoadError(format!("{} has no file extension", path.display()))
        })?;
        Self::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported profile format: {}", ext)))
    }

    /// Parse a document into a JSON object
    pub fn parse(self, content: &str) -> Result<Map<String, Value>> {
        match self {
            FileFormat::Json => match serde_json::from_str(content) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) => Err(ConfigError::ParseError(
                    "a profile document must be a JSON object".to_string(),
                )),
                Err(e) => Err(ConfigError::ParseError(format!("JSON: {}", e))),
            },
            FileFormat::Toml => {
                let table: toml::Table = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML: {}", e)))?;
                match serde_json::to_value(table) {
                    Ok(Value::Object(map)) => Ok(map),
                    Ok(_) => Err(ConfigError::ParseError("TOML root is not a table".to_string())),
                    Err(e) => Err(ConfigError::ParseError(format!("TOML: {}", e))),
                }
            }
        }
    }
}

/// A parsed profile file.
///
/// A document is either one profile (only `model` and `rules` at the root)
/// or a set of named profiles, one table per name:
///
/// ```toml
/// [signup]
/// rules = [["name, email", "required"]]
///
/// [contact.model]
/// scenario = "contact"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDocument {
    root: Map<String, Value>,
}

impl ProfileDocument {
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        Ok(Self {
            root: format.parse(content)?,
        })
    }

    /// Read a `.json` or `.toml` file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        Self::parse(&fs::read_to_string(path)?, format)
    }

    /// Whether the root itself is a single profile
    pub fn is_single(&self) -> bool {
        self.root.keys().all(|key| PROFILE_KEYS.contains(&key.as_str()))
    }

    /// Names of the profiles in a multi-profile document, in file order
    pub fn names(&self) -> Vec<&str> {
        if self.is_single() {
            return Vec::new();
        }
        self.root
            .iter()
            .filter(|(_, value)| value.is_object())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Select the profile body.
    ///
    /// `None` selects the root of a single-profile document; a name selects
    /// one table of a multi-profile document.
    pub fn select(&self, name: Option<&str>) -> Result<Value> {
        match name {
            None if self.is_single() => Ok(Value::Object(self.root.clone())),
            None => Err(ConfigError::LoadError(format!(
                "document holds named profiles ({}); select one by name",
                self.names().join(", ")
            ))),
            Some(name) => match self.root.get(name) {
                Some(body @ Value::Object(_)) if !self.is_single() => Ok(body.clone()),
                _ => Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                    available: self.names().join(", "),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMED: &str = r#"
        [signup]
        rules = [["name, email", "required"]]

        [contact.model]
        scenario = "contact"

        [[contact.rules]]
        attributes = "message"
        kind = "length"
        max = 500
    "#;

    #[test]
    fn test_parse_json() {
        let doc = ProfileDocument::parse(r#"{"rules": [["name", "required"]]}"#, FileFormat::Json)
            .unwrap();
        assert!(doc.is_single());
        assert!(doc.select(None).unwrap()["rules"].is_array());
    }

    #[test]
    fn test_parse_toml_table_rules() {
        let doc = ProfileDocument::parse(
            r#"
            [[rules]]
            attributes = "name"
            kind = "length"
            max = 64
            "#,
            FileFormat::Toml,
        )
        .unwrap();

        let body = doc.select(None).unwrap();
        assert_eq!(body["rules"][0]["max"], 64);
        assert_eq!(body["rules"][0]["kind"], "length");
    }

    #[test]
    fn test_empty_document_is_single_profile() {
        let doc = ProfileDocument::parse("", FileFormat::Toml).unwrap();
        assert!(doc.is_single());
        assert_eq!(doc.select(None).unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn test_named_profiles() {
        let doc = ProfileDocument::parse(NAMED, FileFormat::Toml).unwrap();
        assert!(!doc.is_single());
        assert_eq!(doc.names(), vec!["signup", "contact"]);

        let contact = doc.select(Some("contact")).unwrap();
        assert_eq!(contact["model"]["scenario"], "contact");
        assert_eq!(contact["rules"][0]["max"], 500);

        assert!(matches!(doc.select(None), Err(ConfigError::LoadError(_))));
        let err = doc.select(Some("billing")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Profile 'billing' not found (available: signup, contact)"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(ProfileDocument::parse("{", FileFormat::Json).is_err());
        assert!(ProfileDocument::parse("[1, 2]", FileFormat::Json).is_err());
        assert!(ProfileDocument::parse("rules = [", FileFormat::Toml).is_err());
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);

        assert_eq!(
            FileFormat::from_path(Path::new("rules.toml")).unwrap(),
            FileFormat::Toml
        );
        assert!(FileFormat::from_path(Path::new("rules")).is_err());
        assert!(FileFormat::from_path(Path::new("rules.ini")).is_err());
    }
}
