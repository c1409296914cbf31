//! Platform-agnostic input types
//!
//! Defines the pointer and keyboard events consumed by the editor. Concrete
//! frontends (a windowing loop, a web canvas bridge, a test harness) translate
//! their native events into these types.

use glam::Vec2;

/// Keyboard key enumeration (platform-agnostic)
///
/// Only `Escape` and `Enter` drive editor behavior; the rest exist so that
/// frontends can forward keys without filtering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Delete,
    Space,
    Tab,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Character(char),
}

impl Key {
    /// Maps a DOM-style key name (`KeyboardEvent.key`) to a [`Key`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            " " | "Space" => Self::Space,
            "Tab" => Self::Tab,
            "Shift" | "ShiftLeft" => Self::ShiftLeft,
            "ShiftRight" => Self::ShiftRight,
            "Control" | "ControlLeft" => Self::ControlLeft,
            "ControlRight" => Self::ControlRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Screen-space rectangle of the 3D viewport, in client coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Viewport anchored at the client origin.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

/// A pointer move or click, in client coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub client: Vec2,
    pub viewport: Viewport,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f32, y: f32, viewport: Viewport) -> Self {
        Self {
            client: Vec2::new(x, y),
            viewport,
        }
    }

    /// Normalized device coordinates of this event.
    #[must_use]
    pub fn ndc(&self) -> Vec2 {
        crate::math::pointer_to_ndc(self.client, &self.viewport)
    }
}
