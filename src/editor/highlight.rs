use std::cell::RefCell;
use std::rc::Weak;

use crate::renderer::{DrawableKey, Material, MaterialSlot};
use crate::scene::color::rgb;

pub const HIGHLIGHT_COLOR: u32 = 0xff0000;
pub const HIGHLIGHT_OPACITY: f32 = 0.7;

/// Temporary material override on one drawable.
///
/// The original material is written back when the lease is dropped. If the
/// drawable was discarded by a rebuild in the meantime, dropping is a no-op.
#[derive(Debug)]
pub struct HighlightLease {
    key: DrawableKey,
    slot: Weak<RefCell<Material>>,
    original: Material,
}

impl HighlightLease {
    /// Swaps the highlight material into `slot`.
    #[must_use]
    pub fn acquire(key: DrawableKey, slot: &MaterialSlot) -> Self {
        let highlight = Material::basic(rgb(HIGHLIGHT_COLOR)).with_opacity(HIGHLIGHT_OPACITY);
        let original = slot.replace(highlight);
        Self {
            key,
            slot: std::rc::Rc::downgrade(slot),
            original,
        }
    }

    #[must_use]
    pub fn key(&self) -> DrawableKey {
        self.key
    }

    #[must_use]
    pub fn original(&self) -> &Material {
        &self.original
    }
}

impl Drop for HighlightLease {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            slot.replace(self.original.clone());
        }
    }
}
