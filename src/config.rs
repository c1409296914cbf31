//! Configuration
//!
//! One JSON document with a section per subsystem. Every field has a
//! default, so a partial (or empty) file is valid:
//!
//! ```json
//! {
//!   "renderer": { "shadow_caster_cap": 4 },
//!   "editor": { "autosave": false },
//!   "showcase": { "floor_cycle_secs": 8.0, "poll_interval": 500 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editor::EditorSettings;
use crate::errors::Result;
use crate::renderer::RendererSettings;
use crate::showcase::ShowcaseSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreyConfig {
    pub renderer: RendererSettings,
    pub editor: EditorSettings,
    pub showcase: ShowcaseSettings,
}

impl StoreyConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
