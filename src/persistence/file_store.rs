use std::fs;
use std::path::{Path, PathBuf};

use super::HomeStore;
use crate::errors::{Result, StoreyError};
use crate::scene::Home;

const EXTENSION: &str = ".json";

/// Validates a save name and appends `.json` when missing.
///
/// Names that are empty or could leave the save directory are rejected.
pub fn save_file_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty()
        || name == EXTENSION
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
    {
        return Err(StoreyError::InvalidFilename(name.to_string()));
    }
    if name.ends_with(EXTENSION) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{EXTENSION}"))
    }
}

/// One pretty-printed JSON file per save, in a single directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root_path: PathBuf,
}

impl JsonFileStore {
    /// Opens `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root_path = root.as_ref().to_path_buf();
        fs::create_dir_all(&root_path)?;
        Ok(Self { root_path })
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        Ok(self.root_path.join(save_file_name(name)?))
    }
}

impl HomeStore for JsonFileStore {
    fn load_home(&self, name: &str) -> Result<Home> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreyError::SaveNotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        let mut home: Home = serde_json::from_str(&text)?;
        let repaired = home.normalize_lights();
        if repaired > 0 {
            log::warn!("Repaired {repaired} light intensities in {}", path.display());
        }
        log::info!("Loaded {} ({} floors)", path.display(), home.floors.len());
        Ok(home)
    }

    fn save_home(&self, name: &str, home: &Home) -> Result<()> {
        let path = self.path_for(name)?;
        let text = serde_json::to_string_pretty(home)?;
        // write-then-rename so a crash never leaves a truncated save
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }

    fn list_saves(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && name.ends_with(EXTENSION)
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
