#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod config;
pub mod editor;
pub mod errors;
pub mod math;
pub mod persistence;
pub mod renderer;
pub mod scene;
pub mod showcase;
pub mod utils;

pub use app::{Key, PointerEvent, Viewport};
pub use config::StoreyConfig;
pub use editor::{Editor, EditorMode, Notification, ToolKind};
pub use errors::{Result, StoreyError};
pub use persistence::{AutoSaver, HomeStore, JsonFileStore};
pub use renderer::{Drawable, DrawableKind, RendererSettings, SceneRenderer};
pub use scene::{Camera, Cube, Floor, Home, Light, LightState, Point3, Wall, Window};
pub use showcase::{ShowcaseConfig, ShowcaseDriver};
pub use utils::orbit_control::OrbitControls;

pub mod prelude {
    pub use crate::app::{Key, PointerEvent, Viewport};
    pub use crate::config::StoreyConfig;
    pub use crate::editor::{Editor, EditorSettings, Notification, ToolKind};
    pub use crate::persistence::{HomeStore, JsonFileStore};
    pub use crate::renderer::{RendererSettings, SceneRenderer};
    pub use crate::scene::{Camera, Cube, Floor, Home, Light, LightState, Point3, Wall, Window};
    pub use crate::showcase::{ChannelFeed, LiveUpdate, ShowcaseConfig, ShowcaseDriver, ShowcaseSettings};
    pub use glam::{Vec2, Vec3};
}
