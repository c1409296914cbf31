use serde::{Deserialize, Serialize};

/// Editor behavior switches, loaded from the `editor` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Queue a snapshot after every model change.
    pub autosave: bool,
    /// Save name used until the user saves under another one.
    pub default_filename: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            autosave: true,
            default_filename: "default.json".to_string(),
        }
    }
}
