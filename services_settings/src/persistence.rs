//! Settings persistence layer
//!
//! Overrides are stored as versioned JSON with keys in stable order:
//!
//! ```json
//! { "version": 1, "overrides": { "codec.line_ending": "crlf" } }
//! ```

use crate::{SettingKey, SettingValue, SettingsError, SettingsRegistry, SettingsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable container for settings overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format
    pub version: u32,
    #[serde(default)]
    pub overrides: BTreeMap<String, SettingValue>,
}

impl SettingsOverridesData {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            overrides: BTreeMap::new(),
        }
    }

    /// Snapshot the overrides of a registry
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let mut data = Self::new();
        for (key, value) in registry.export_overrides() {
            data.overrides.insert(key.as_str().to_string(), value);
        }
        data
    }

    pub fn to_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides
            .iter()
            .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
            .collect()
    }

    /// Apply the stored overrides on top of `registry`
    pub fn apply_to(&self, registry: &mut SettingsRegistry) -> SettingsResult<()> {
        registry.apply_overrides(self.to_overrides())
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> SettingsResult<Vec<u8>> {
    serde_json::to_vec_pretty(data).map_err(|e| SettingsError::SerializationFailed(e.to_string()))
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> SettingsResult<SettingsOverridesData> {
    let data: SettingsOverridesData = serde_json::from_slice(bytes)
        .map_err(|e| SettingsError::DeserializationFailed(e.to_string()))?;

    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(SettingsError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Attempts to load settings from bytes, falling back to no overrides on error
pub fn load_overrides_safe(bytes: &[u8]) -> SettingsOverridesData {
    deserialize_overrides(bytes).unwrap_or_default()
}
