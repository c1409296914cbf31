//! Showcase
//!
//! Read-only presentation of a home: the camera circles the house, floors are
//! revealed one after another and light or background changes made elsewhere
//! are mirrored as they arrive.

pub mod config;
pub mod feed;

use glam::Vec3;

use crate::renderer::SceneRenderer;
use crate::scene::{Camera, FLOOR_HEIGHT, Home};
use crate::utils::orbit_control::OrbitControls;

pub use config::{FloorSelection, ShowcaseConfig, ShowcaseSettings};
pub use feed::{ChannelFeed, LiveFeed, LiveUpdate, UpdateKey, VersionTable};

/// Orbit radius never drops below this, however small the house.
pub const MIN_ORBIT_RADIUS: f32 = 30.0;
pub const RADIUS_PER_DIAGONAL: f32 = 1.2;
pub const HEIGHT_PER_DIAGONAL: f32 = 0.6;
/// Extra radius factor applied on top of `1 / aspect` in portrait viewports.
pub const PORTRAIT_FACTOR: f32 = 0.8;

// ============================================================================
// Framing
// ============================================================================

/// Where the camera looks and how far it stays away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseFrame {
    pub center: Vec3,
    /// Diagonal of the footprint extended by the stacked floor height.
    pub diagonal: f32,
    pub max_level: u32,
}

impl HouseFrame {
    #[must_use]
    pub fn from_home(home: &Home) -> Self {
        let max_level = home.max_level();
        #[allow(clippy::cast_precision_loss)]
        let height = max_level as f32 * FLOOR_HEIGHT;
        let (center, size) = home
            .footprint_bounds()
            .map_or((glam::Vec2::ZERO, glam::Vec2::ZERO), |b| (b.center(), b.size()));
        Self {
            center: Vec3::new(center.x, height / 2.0, center.y),
            diagonal: Vec3::new(size.x, height, size.y).length(),
            max_level,
        }
    }

    /// Horizontal orbit radius for a viewport of `aspect` (width / height).
    #[must_use]
    pub fn orbit_radius(&self, aspect: f32) -> f32 {
        let radius = (self.diagonal * RADIUS_PER_DIAGONAL).max(MIN_ORBIT_RADIUS);
        if aspect > 0.0 && aspect < 1.0 {
            radius * (1.0 / aspect) * PORTRAIT_FACTOR
        } else {
            radius
        }
    }

    /// Eye height above [`center`](Self::center).
    #[must_use]
    pub fn eye_height(&self) -> f32 {
        self.diagonal * HEIGHT_PER_DIAGONAL
    }
}

/// Camera state after one [`ShowcaseDriver::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub eye: Vec3,
    pub target: Vec3,
    /// Highest floor currently requested.
    pub floor_limit: u32,
    /// Floors are still easing in or out.
    pub animating: bool,
}

// ============================================================================
// Driver
// ============================================================================

pub struct ShowcaseDriver {
    settings: ShowcaseSettings,
    config: ShowcaseConfig,
    renderer: SceneRenderer,
    camera: Camera,
    orbit: OrbitControls,

    home: Option<Home>,
    frame: Option<HouseFrame>,
    aspect: f32,

    current_max_floor: i64,
    floor_direction: i64,
    since_switch: f32,

    feed: Option<Box<dyn LiveFeed>>,
    since_poll: f32,
    versions: VersionTable,
}

impl ShowcaseDriver {
    #[must_use]
    pub fn new(settings: ShowcaseSettings, config: ShowcaseConfig, renderer: SceneRenderer) -> Self {
        let mut orbit = OrbitControls::new(Vec3::ZERO, MIN_ORBIT_RADIUS);
        orbit.auto_rotate = config.revolve;
        orbit.auto_rotate_speed = settings.orbit_speed;
        Self {
            settings,
            config,
            renderer,
            camera: Camera::default(),
            orbit,
            home: None,
            frame: None,
            aspect: 16.0 / 9.0,
            current_max_floor: 0,
            floor_direction: 1,
            since_switch: 0.0,
            feed: None,
            since_poll: 0.0,
            versions: VersionTable::default(),
        }
    }

    /// Takes the initial home from `feed` and keeps polling it.
    #[must_use]
    pub fn with_feed(mut self, feed: impl LiveFeed + 'static) -> Self {
        if let Some(home) = feed.current_home() {
            let aspect = self.aspect;
            self.load(home, aspect);
        }
        self.feed = Some(Box::new(feed));
        self
    }

    #[must_use]
    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn home(&self) -> Option<&Home> {
        self.home.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> ShowcaseConfig {
        self.config
    }

    #[must_use]
    pub fn frame(&self) -> Option<&HouseFrame> {
        self.frame.as_ref()
    }

    /// Floor limit currently requested from the renderer.
    #[must_use]
    pub fn floor_limit(&self) -> u32 {
        u32::try_from(self.current_max_floor).unwrap_or(0)
    }

    /// Shows `home`, framed for a viewport of `aspect`.
    pub fn load(&mut self, mut home: Home, aspect: f32) {
        home.normalize_lights();
        self.renderer.render(&home);
        self.renderer.set_background(&home.background_color);
        self.renderer.set_gizmo_visibility(false);

        let frame = HouseFrame::from_home(&home);
        self.frame = Some(frame);
        self.resize(aspect);

        self.current_max_floor = match self.config.floor {
            FloorSelection::Auto => 0,
            FloorSelection::Level(level) => i64::from(fixed_level(level, frame.max_level)),
        };
        self.floor_direction = 1;
        self.since_switch = 0.0;
        self.renderer.set_visible_floor_limit(self.floor_limit(), false);

        log::info!(
            "Showcase: {} ({} floors, radius {:.1})",
            home.name,
            home.floors.len(),
            self.orbit.radius
        );
        self.home = Some(home);
    }

    /// Re-frames the orbit for a new viewport aspect ratio.
    pub fn resize(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.camera.set_aspect(aspect);
        if let Some(frame) = self.frame {
            self.orbit.center = frame.center;
            self.orbit.set_cylindrical(frame.orbit_radius(aspect), frame.eye_height());
        }
    }

    /// Applies new runtime options. A fixed floor takes effect at once.
    pub fn set_config(&mut self, config: ShowcaseConfig) {
        self.config = config;
        self.orbit.auto_rotate = config.revolve;
        if let FloorSelection::Level(level) = config.floor
            && let Some(frame) = self.frame
        {
            self.current_max_floor = i64::from(fixed_level(level, frame.max_level));
            self.renderer.set_visible_floor_limit(self.floor_limit(), false);
        }
    }

    /// Advances the presentation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> FrameView {
        self.poll_feed(dt);
        self.cycle_floors(dt);

        self.orbit.update(&mut self.camera, dt);
        let target = self.orbit.center;
        let floor = self.renderer.highest_visible_floor();
        self.renderer.update_smart_walls(self.camera.position, target, floor);
        let animating = self.renderer.animate_floor_transitions();

        FrameView {
            eye: self.camera.position,
            target,
            floor_limit: self.floor_limit(),
            animating,
        }
    }

    fn cycle_floors(&mut self, dt: f32) {
        if self.config.floor != FloorSelection::Auto {
            return;
        }
        let Some(count) = self.home.as_ref().map(|h| h.floors.len()) else {
            return;
        };
        if count == 0 {
            return;
        }
        self.since_switch += dt;
        if self.since_switch <= self.settings.floor_cycle_secs {
            return;
        }
        self.since_switch = 0.0;
        self.current_max_floor = self.next_floor(i64::try_from(count).unwrap_or(i64::MAX));
        log::debug!("Showcase floor limit: {}", self.current_max_floor);
        self.renderer.set_visible_floor_limit(self.floor_limit(), false);
    }

    /// Ping-pong step over `0..count`.
    fn next_floor(&mut self, count: i64) -> i64 {
        let mut next = self.current_max_floor + self.floor_direction;
        if next >= count {
            next = (count - 2).max(0);
            self.floor_direction = -1;
        } else if next < 0 {
            next = if count > 1 { 1 } else { 0 };
            self.floor_direction = 1;
        }
        next
    }

    fn poll_feed(&mut self, dt: f32) {
        self.since_poll += dt;
        if self.since_poll < self.settings.poll_interval.as_secs_f32() {
            return;
        }
        self.since_poll = 0.0;
        let Some(feed) = self.feed.as_mut() else {
            return;
        };
        let updates = feed.poll_updates();
        let latest = feed.current_home();
        for update in updates {
            self.apply_update(update);
        }
        // changes the feed never pushed as deltas
        if let Some(home) = latest {
            self.refresh_from_model(home);
        }
    }

    /// Applies one pushed change unless a newer or equal version was seen.
    pub fn apply_update(&mut self, update: LiveUpdate) -> bool {
        if !self.versions.accept(&update) {
            return false;
        }

        match update {
            LiveUpdate::Light { light_id, state, .. } => {
                let Some(home) = self.home.as_mut() else {
                    return false;
                };
                if !home.update_light_by_id(light_id, &state) {
                    return false;
                }
                match home.light(light_id) {
                    Some(light) => self.renderer.update_light(light_id, &light.state),
                    None => false,
                }
            }
            LiveUpdate::Background { color, .. } => {
                if let Some(home) = self.home.as_mut() {
                    home.background_color.clone_from(&color);
                }
                self.renderer.set_background(&color)
            }
        }
    }

    /// Mirrors light states and background of a freshly fetched model.
    ///
    /// Geometry is not rebuilt; use [`load`](Self::load) for that.
    pub fn refresh_from_model(&mut self, mut home: Home) {
        home.normalize_lights();
        self.renderer.update_lights(&home);
        self.renderer.set_background(&home.background_color);
        self.home = Some(home);
    }
}

/// A fixed level above the top floor falls back to the ground floor.
fn fixed_level(level: u32, max_level: u32) -> u32 {
    if level > max_level { 0 } else { level }
}
