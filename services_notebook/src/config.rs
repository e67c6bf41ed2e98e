//! Typed view of the settings a notebook session consumes

use note_tree::RootTemplate;
use outline_codec::{CodecOptions, LineEnding, TextEncoding};
use services_search::{SearchOptions, SearchScope};
use services_settings::{keys, SettingsError, SettingsRegistry, SettingsResult};

/// Notebook configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookSettings {
    pub codec: CodecOptions,
    /// Root of a fresh document
    pub template: RootTemplate,
    /// Title of nodes created by add child / add sibling
    pub new_node_title: String,
    /// Initial search flags for hosts that don't carry their own
    pub search_options: SearchOptions,
    pub search_scope: SearchScope,
}

impl NotebookSettings {
    /// Project the effective values of `registry`
    pub fn from_registry(registry: &SettingsRegistry) -> SettingsResult<Self> {
        let label = registry.get_string(keys::CODEC_ENCODING)?;
        let encoding = TextEncoding::for_label(label).ok_or_else(|| {
            SettingsError::invalid_value(
                keys::CODEC_ENCODING,
                format!("unsupported text encoding {:?}", label),
            )
        })?;
        let line_ending: LineEnding = registry
            .get_string(keys::CODEC_LINE_ENDING)?
            .parse()
            .map_err(|e: String| SettingsError::invalid_value(keys::CODEC_LINE_ENDING, e))?;
        let search_scope: SearchScope = registry
            .get_string(keys::SEARCH_SCOPE)?
            .parse()
            .map_err(|e: String| SettingsError::invalid_value(keys::SEARCH_SCOPE, e))?;

        Ok(Self {
            codec: CodecOptions::new()
                .with_encoding(encoding)
                .with_line_ending(line_ending),
            template: RootTemplate::new(
                registry.get_string(keys::DOCUMENT_ROOT_TITLE)?,
                registry.get_string(keys::DOCUMENT_ROOT_CONTENT)?,
            ),
            new_node_title: registry
                .get_string(keys::DOCUMENT_NEW_NODE_TITLE)?
                .to_string(),
            search_options: SearchOptions::new()
                .match_case(registry.get_bool(keys::SEARCH_MATCH_CASE)?)
                .whole_word(registry.get_bool(keys::SEARCH_WHOLE_WORD)?)
                .use_regex(registry.get_bool(keys::SEARCH_USE_REGEX)?),
            search_scope,
        })
    }
}

impl Default for NotebookSettings {
    fn default() -> Self {
        Self {
            codec: CodecOptions::default(),
            template: RootTemplate::default(),
            new_node_title: "New Node".to_string(),
            search_options: SearchOptions::default(),
            search_scope: SearchScope::default(),
        }
    }
}
