//! Persistence
//!
//! Homes are stored as one JSON document per save name. The editor never
//! blocks on a write: snapshots go to an [`AutoSaver`] worker and outcomes are
//! collected later.

pub mod autosave;
pub mod file_store;

pub use autosave::{AutoSaver, SaveOrigin, SaveOutcome};
pub use file_store::{JsonFileStore, save_file_name};

use crate::errors::Result;
use crate::scene::Home;

/// Where homes are loaded from and saved to.
pub trait HomeStore: Send + Sync {
    fn load_home(&self, name: &str) -> Result<Home>;

    fn save_home(&self, name: &str, home: &Home) -> Result<()>;

    /// Save names, sorted.
    fn list_saves(&self) -> Result<Vec<String>>;
}
