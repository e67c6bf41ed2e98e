//! # Settings Registry Service
//!
//! Typed settings for the notebook: codec, document template and search defaults.
//!
//! ## Philosophy
//!
//! - **Typed settings**: Every key has a registered default, and overrides must keep its type
//! - **Layered**: Read-only defaults + overrides
//! - **Deterministic**: Settings are serializable and reproducible
//! - **Testable**: All settings logic can be tested independently
//!
//! ## Example
//!
//! ```
//! use services_settings::{create_default_registry, keys, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry
//!     .set_override(keys::SEARCH_MATCH_CASE, SettingValue::Boolean(true))
//!     .unwrap();
//!
//! assert_eq!(registry.get_bool(keys::SEARCH_MATCH_CASE), Ok(true));
//! ```

pub mod persistence;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if this key starts with the given prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
///
/// Serialized as a bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl SettingValue {
    /// Name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::String(_) => "string",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, SettingValue::Boolean(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, SettingValue::Integer(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, SettingValue::String(_))
    }

    /// Tries to get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    fn same_type(&self, other: &SettingValue) -> bool {
        self.type_name() == other.type_name()
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Boolean(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::String(v.to_string())
    }
}

/// Settings errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(SettingKey),

    #[error("Setting {key} expects a {expected} value, got {found}")]
    TypeMismatch {
        key: SettingKey,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: SettingKey, message: String },

    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),
}

impl SettingsError {
    pub fn invalid_value(key: impl Into<SettingKey>, message: impl Into<String>) -> Self {
        SettingsError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings registry
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override
    ///
    /// The key must have a registered default of the same type.
    pub fn set_override(&mut self, key: impl Into<SettingKey>, value: SettingValue) -> SettingsResult<()> {
        let key = key.into();
        let default = self
            .defaults
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
        if !default.same_type(&value) {
            return Err(SettingsError::TypeMismatch {
                key,
                expected: default.type_name(),
                found: value.type_name(),
            });
        }
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Removes an override
    pub fn remove_override(&mut self, key: &SettingKey) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Gets the effective value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    pub fn get_default(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    pub fn get_override(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key)
    }

    /// Effective boolean value
    pub fn get_bool(&self, key: &str) -> SettingsResult<bool> {
        let value = self.require(key)?;
        value.as_boolean().ok_or_else(|| SettingsError::TypeMismatch {
            key: SettingKey::new(key),
            expected: "boolean",
            found: value.type_name(),
        })
    }

    /// Effective string value
    pub fn get_string(&self, key: &str) -> SettingsResult<&str> {
        let value = self.require(key)?;
        value.as_string().ok_or_else(|| SettingsError::TypeMismatch {
            key: SettingKey::new(key),
            expected: "string",
            found: value.type_name(),
        })
    }

    fn require(&self, key: &str) -> SettingsResult<&SettingValue> {
        let key = SettingKey::new(key);
        self.get(&key).ok_or(SettingsError::UnknownKey(key))
    }

    /// Returns all default setting keys
    pub fn list_defaults(&self) -> Vec<SettingKey> {
        self.defaults.keys().cloned().collect()
    }

    /// Returns all overridden keys
    pub fn list_overrides(&self) -> Vec<SettingKey> {
        self.overrides.keys().cloned().collect()
    }

    /// Returns all effective settings with a given prefix, in key order
    pub fn list_with_prefix(&self, prefix: &str) -> Vec<(SettingKey, SettingValue)> {
        self.defaults
            .keys()
            .chain(self.overrides.keys())
            .filter(|key| key.starts_with(prefix))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    /// Clears all overrides
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Resets a setting to its default value
    pub fn reset_to_default(&mut self, key: &SettingKey) -> bool {
        self.remove_override(key)
    }

    /// Exports overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Applies overrides (merges with existing)
    ///
    /// Validated one by one; the first invalid entry aborts and leaves the
    /// entries before it applied.
    pub fn apply_overrides(&mut self, overrides: BTreeMap<SettingKey, SettingValue>) -> SettingsResult<()> {
        for (key, value) in overrides {
            self.set_override(key, value)?;
        }
        Ok(())
    }
}

/// Recognised setting keys
pub mod keys {
    pub const CODEC_ENCODING: &str = "codec.encoding";
    pub const CODEC_LINE_ENDING: &str = "codec.line_ending";
    pub const DOCUMENT_ROOT_TITLE: &str = "document.root_title";
    pub const DOCUMENT_ROOT_CONTENT: &str = "document.root_content";
    pub const DOCUMENT_NEW_NODE_TITLE: &str = "document.new_node_title";
    pub const SEARCH_MATCH_CASE: &str = "search.match_case";
    pub const SEARCH_WHOLE_WORD: &str = "search.whole_word";
    pub const SEARCH_USE_REGEX: &str = "search.use_regex";
    pub const SEARCH_SCOPE: &str = "search.scope";
}

/// Creates a settings registry with default settings
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();

    // Codec
    registry.register_default(keys::CODEC_ENCODING, "utf-8".into());
    registry.register_default(keys::CODEC_LINE_ENDING, "lf".into());

    // Document template
    registry.register_default(keys::DOCUMENT_ROOT_TITLE, "My Document".into());
    registry.register_default(keys::DOCUMENT_ROOT_CONTENT, "This is the root node.".into());
    registry.register_default(keys::DOCUMENT_NEW_NODE_TITLE, "New Node".into());

    // Search
    registry.register_default(keys::SEARCH_MATCH_CASE, false.into());
    registry.register_default(keys::SEARCH_WHOLE_WORD, false.into());
    registry.register_default(keys::SEARCH_USE_REGEX, false.into());
    registry.register_default(keys::SEARCH_SCOPE, "current_node".into());

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_key_starts_with() {
        let key = SettingKey::new("search.match_case");
        assert_eq!(key.as_str(), "search.match_case");
        assert!(key.starts_with("search"));
        assert!(!key.starts_with("codec"));
    }

    #[test]
    fn test_setting_value_accessors() {
        let val = SettingValue::Boolean(true);
        assert!(val.is_boolean());
        assert_eq!(val.as_boolean(), Some(true));
        assert_eq!(val.as_integer(), None);

        let val = SettingValue::Integer(42);
        assert!(val.is_integer());
        assert_eq!(val.as_integer(), Some(42));

        let val = SettingValue::from("lf");
        assert!(val.is_string());
        assert_eq!(val.as_string(), Some("lf"));
        assert_eq!(val.to_string(), "lf");
    }

    #[test]
    fn test_override_falls_back_to_default() {
        let mut registry = SettingsRegistry::new();
        registry.register_default("test.key", SettingValue::Integer(42));
        registry
            .set_override("test.key", SettingValue::Integer(100))
            .unwrap();

        let key = SettingKey::new("test.key");
        assert_eq!(registry.get(&key), Some(&SettingValue::Integer(100)));
        assert_eq!(registry.get_default(&key), Some(&SettingValue::Integer(42)));

        assert!(registry.reset_to_default(&key));
        assert_eq!(registry.get(&key), Some(&SettingValue::Integer(42)));
        assert!(!registry.remove_override(&key));
    }

    #[test]
    fn test_override_unknown_key_rejected() {
        let mut registry = create_default_registry();
        let result = registry.set_override("editor.tab_size", SettingValue::Integer(2));
        assert_eq!(
            result,
            Err(SettingsError::UnknownKey(SettingKey::new("editor.tab_size")))
        );
    }

    #[test]
    fn test_override_type_mismatch_rejected() {
        let mut registry = create_default_registry();
        let result = registry.set_override(keys::SEARCH_MATCH_CASE, "yes".into());
        assert!(matches!(
            result,
            Err(SettingsError::TypeMismatch {
                expected: "boolean",
                found: "string",
                ..
            })
        ));
        assert_eq!(registry.get_bool(keys::SEARCH_MATCH_CASE), Ok(false));
    }

    #[test]
    fn test_typed_getters() {
        let registry = create_default_registry();
        assert_eq!(registry.get_string(keys::CODEC_ENCODING), Ok("utf-8"));
        assert_eq!(registry.get_bool(keys::SEARCH_USE_REGEX), Ok(false));
        assert!(matches!(
            registry.get_bool(keys::CODEC_ENCODING),
            Err(SettingsError::TypeMismatch { .. })
        ));
        assert!(matches!(
            registry.get_string("no.such.key"),
            Err(SettingsError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_list_with_prefix() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::SEARCH_WHOLE_WORD, true.into())
            .unwrap();

        let settings = registry.list_with_prefix("search.");
        assert_eq!(settings.len(), 4);
        let whole_word = settings
            .iter()
            .find(|(k, _)| k.as_str() == keys::SEARCH_WHOLE_WORD);
        assert_eq!(whole_word.unwrap().1, SettingValue::Boolean(true));

        assert_eq!(registry.list_with_prefix("document.").len(), 3);
    }

    #[test]
    fn test_apply_and_export_overrides() {
        let mut registry = create_default_registry();
        let mut overrides = BTreeMap::new();
        overrides.insert(SettingKey::new(keys::CODEC_LINE_ENDING), "crlf".into());
        overrides.insert(SettingKey::new(keys::SEARCH_MATCH_CASE), true.into());

        registry.apply_overrides(overrides.clone()).unwrap();
        assert_eq!(registry.export_overrides(), overrides);
        assert_eq!(registry.list_overrides().len(), 2);

        registry.clear_overrides();
        assert!(registry.list_overrides().is_empty());
        assert_eq!(registry.get_string(keys::CODEC_LINE_ENDING), Ok("lf"));
    }

    #[test]
    fn test_create_default_registry() {
        let registry = create_default_registry();
        assert_eq!(registry.list_defaults().len(), 9);
        assert_eq!(registry.get_string(keys::DOCUMENT_ROOT_TITLE), Ok("My Document"));
        assert_eq!(
            registry.get_string(keys::DOCUMENT_ROOT_CONTENT),
            Ok("This is the root node.")
        );
        assert_eq!(registry.get_string(keys::DOCUMENT_NEW_NODE_TITLE), Ok("New Node"));
        assert_eq!(registry.get_string(keys::SEARCH_SCOPE), Ok("current_node"));
    }
}
