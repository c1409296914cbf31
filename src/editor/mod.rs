//! Interactive editor
//!
//! Turns pointer and keyboard input into model mutations. Every mutation
//! records an [`EditCommand`] for undo, rebuilds the renderer, notifies the
//! panels and queues an autosave.
//!
//! Tool operations silently do nothing while no home is loaded.
//!
//! ```rust,ignore
//! let mut editor = Editor::new(EditorSettings::default(), SceneRenderer::default())
//!     .with_notifier(|n| println!("{n:?}"));
//! editor.load_home(Home::with_ground_floor("Demo"));
//! editor.set_enabled(true);
//! editor.set_mode(ToolKind::Wall);
//! editor.on_click(&PointerEvent::new(400.0, 300.0, viewport));
//! ```

pub mod highlight;
pub mod history;
pub mod mode;
pub mod notify;
pub mod settings;

use std::sync::Arc;

use glam::Vec3;
use uuid::Uuid;

use crate::app::input::{Key, PointerEvent};
use crate::math::{Ray, floor_point, planar_distance};
use crate::persistence::{AutoSaver, HomeStore, SaveOrigin, SaveOutcome, save_file_name};
use crate::renderer::{DrawableKey, DrawableKind, EntityRef, Pick, SceneRenderer, SourceRef, Transform};
use crate::scene::home::remove_by_id;
use crate::scene::wall::segment_angle;
use crate::scene::{Camera, Cube, Floor, Home, Light, LightState, Point3, Wall, parse_hex_color};

pub use highlight::HighlightLease;
pub use history::{EditCommand, UndoStack};
pub use mode::{EditorMode, ToolKind};
pub use notify::{LogSink, Notification, NotificationSink};
pub use settings::EditorSettings;

/// A polygon click this close to the first point closes the outline.
pub const POLYGON_CLOSE_DISTANCE: f32 = 0.5;
pub const LIGHT_MOUNT_HEIGHT: f32 = 2.0;
pub const NEW_LIGHT_NAME: &str = "New Light";
pub const NEW_CUBE_COLOR: &str = "#808080";
pub const WALL_PREVIEW_LIFT: f32 = 1.25;
pub const WALL_PREVIEW_MIN_LENGTH: f32 = 0.1;

// ============================================================================
// Preview
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WallPreview {
    pub start: Vec3,
    pub end: Vec3,
    pub length: f32,
    /// Unit box stretched along X by the wall length.
    pub transform: Transform,
    pub label: String,
}

impl WallPreview {
    #[must_use]
    pub fn between(start: Vec3, end: Vec3) -> Self {
        let length = planar_distance(start, end);
        let mid = (start + end) * 0.5;
        let mut transform = Transform::from_position_yaw(
            Vec3::new(mid.x, start.y + WALL_PREVIEW_LIFT, mid.z),
            segment_angle(start, end),
        );
        transform.scale.x = if length > 0.0 {
            length
        } else {
            WALL_PREVIEW_MIN_LENGTH
        };
        Self {
            start,
            end,
            length,
            transform,
            label: format!("WALL LENGTH: {length:.2}m"),
        }
    }
}

/// Transient geometry shown while a multi-click tool is in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Wall(WallPreview),
    /// Placed points followed by the cursor.
    FloorOutline { points: Vec<Vec3> },
}

// ============================================================================
// Editor
// ============================================================================

pub struct Editor {
    settings: EditorSettings,
    home: Option<Home>,
    renderer: SceneRenderer,
    camera: Camera,

    enabled: bool,
    mode: EditorMode,
    current_floor: usize,
    selection: Option<SourceRef>,
    history: UndoStack,
    hover: Option<HighlightLease>,
    preview: Option<Preview>,
    cursor: Option<Vec3>,

    notifier: Box<dyn NotificationSink>,
    store: Option<Arc<dyn HomeStore>>,
    saver: Option<AutoSaver>,
    filename: String,
}

impl Editor {
    #[must_use]
    pub fn new(settings: EditorSettings, renderer: SceneRenderer) -> Self {
        let filename = settings.default_filename.clone();
        Self {
            settings,
            home: None,
            renderer,
            camera: Camera::default(),
            enabled: false,
            mode: EditorMode::None,
            current_floor: 0,
            selection: None,
            history: UndoStack::new(),
            hover: None,
            preview: None,
            cursor: None,
            notifier: Box::new(LogSink),
            store: None,
            saver: None,
            filename,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.notifier = Box::new(sink);
        self
    }

    /// Attaches a store and starts the background save worker.
    ///
    /// If the worker cannot be started, saves run synchronously.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn HomeStore>) -> Self {
        match AutoSaver::spawn(store.clone()) {
            Ok(saver) => self.saver = Some(saver),
            Err(err) => log::warn!("Autosave worker unavailable, saving inline: {err}"),
        }
        self.store = Some(store);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn home(&self) -> Option<&Home> {
        self.home.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut SceneRenderer {
        &mut self.renderer
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    #[must_use]
    pub fn tool(&self) -> ToolKind {
        self.mode.kind()
    }

    #[must_use]
    pub fn selection(&self) -> Option<SourceRef> {
        self.selection
    }

    /// The selected cube, for a property panel.
    #[must_use]
    pub fn selected_cube(&self) -> Option<&Cube> {
        let selection = self.selection?;
        let EntityRef::Cube(id) = selection.entity else {
            return None;
        };
        self.home.as_ref()?.floor_by_id(selection.floor_id)?.cube(id)
    }

    #[must_use]
    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Snapped cursor marker position.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec3> {
        self.cursor
    }

    /// Drawable currently carrying the delete highlight.
    #[must_use]
    pub fn highlighted(&self) -> Option<DrawableKey> {
        self.hover.as_ref().map(HighlightLease::key)
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn current_floor(&self) -> Option<&Floor> {
        self.home.as_ref()?.floors.get(self.current_floor)
    }

    /// Level of the active floor, `0` before a home is loaded.
    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.current_floor().map_or(0, |f| f.level)
    }

    fn current_floor_mut(&mut self) -> Option<&mut Floor> {
        self.home.as_mut()?.floors.get_mut(self.current_floor)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn message(&mut self, text: impl Into<String>) {
        self.notify(Notification::message(text));
    }

    // ========================================================================
    // Modes
    // ========================================================================

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.set_mode(ToolKind::None);
            self.cursor = None;
        }
    }

    /// Switches tool. Pending points, preview and highlight are dropped.
    pub fn set_mode(&mut self, kind: ToolKind) {
        self.hover = None;
        self.preview = None;
        self.mode = EditorMode::enter(kind);
        log::debug!("Tool: {}", kind.to_string());
    }

    // ========================================================================
    // Input
    // ========================================================================

    fn ray(&self, event: &PointerEvent) -> Ray {
        self.camera.ray_from_pointer(event)
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if !self.enabled {
            return;
        }
        let ray = self.ray(event);
        if let Some(point) = floor_point(&ray, self.current_level()) {
            self.update_cursor(point);
        }
        let pick = match self.mode {
            EditorMode::Delete => self.renderer.pick(&ray),
            _ => None,
        };
        self.handle_hover(pick);
    }

    /// Moves the cursor marker and the live preview to `point`.
    pub fn update_cursor(&mut self, point: Vec3) {
        self.cursor = Some(point);
        self.preview = match &self.mode {
            EditorMode::Wall {
                pending_start: Some(start),
            } => Some(Preview::Wall(WallPreview::between(*start, point))),
            EditorMode::FloorPolygon { points } if !points.is_empty() => {
                let mut outline = points.clone();
                outline.push(point);
                Some(Preview::FloorOutline { points: outline })
            }
            _ => None,
        };
    }

    /// Applies or clears the delete highlight for the object under the pointer.
    pub fn handle_hover(&mut self, pick: Option<Pick>) {
        if !matches!(self.mode, EditorMode::Delete) {
            self.hover = None;
            return;
        }
        let Some(pick) = pick else {
            self.hover = None;
            return;
        };
        if self.highlighted() == Some(pick.key) {
            return;
        }
        // restore the previous target before taking the new one
        self.hover = None;
        self.hover = self
            .renderer
            .material_slot(pick.key)
            .map(|slot| HighlightLease::acquire(pick.key, &slot));
    }

    /// Returns `true` when the click was consumed by an active tool, so
    /// camera controls should ignore it.
    pub fn on_click(&mut self, event: &PointerEvent) -> bool {
        let ray = self.ray(event);
        let pick = self.renderer.pick(&ray);
        let point = floor_point(&ray, self.current_level());
        self.handle_click(pick, point)
    }

    /// Click dispatch with the hit object and snapped floor point resolved.
    pub fn handle_click(&mut self, pick: Option<Pick>, point: Option<Vec3>) -> bool {
        let consumed = self.enabled && self.mode.is_tool_active();

        if self.enabled && matches!(self.mode, EditorMode::Delete) {
            if let Some(pick) = pick {
                self.delete(pick.source);
                self.selection = None;
                self.hover = None;
            }
            return consumed;
        }

        // selection works in view mode too
        match pick {
            Some(pick) if pick.kind == DrawableKind::Cube => {
                self.selection = Some(pick.source);
                self.notify(Notification::ContentChanged);
                if !self.enabled {
                    return consumed;
                }
            }
            Some(_) => {}
            None => {
                if self.selection.take().is_some() {
                    self.notify(Notification::ContentChanged);
                }
            }
        }

        if !self.enabled {
            return consumed;
        }
        let Some(point) = point else {
            return consumed;
        };

        match self.mode {
            EditorMode::Cube => {
                self.add_cube(point);
            }
            EditorMode::Light => {
                self.add_light(point);
            }
            EditorMode::Wall { pending_start } => match pending_start {
                None => {
                    self.mode = EditorMode::Wall {
                        pending_start: Some(point),
                    };
                    self.update_cursor(point);
                }
                Some(start) => {
                    self.mode = EditorMode::Wall {
                        pending_start: None,
                    };
                    self.preview = None;
                    self.add_wall(start, point);
                }
            },
            EditorMode::FloorPolygon { .. } => self.place_floor_point(point),
            EditorMode::None | EditorMode::Delete => {}
        }
        consumed
    }

    pub fn on_key_down(&mut self, key: Key) {
        match key {
            Key::Escape => {
                if let EditorMode::Wall {
                    pending_start: Some(_),
                } = self.mode
                {
                    self.mode = EditorMode::Wall {
                        pending_start: None,
                    };
                    self.preview = None;
                    self.message("Wall ended");
                } else {
                    self.set_mode(ToolKind::None);
                    self.message("Tool cancelled");
                }
            }
            Key::Enter => {
                if matches!(self.mode, EditorMode::FloorPolygon { .. }) {
                    self.finish_floor_polygon();
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Adds a wall to the active floor.
    pub fn add_wall(&mut self, p1: Vec3, p2: Vec3) -> Option<Uuid> {
        let floor = self.current_floor_mut()?;
        let wall = Wall::new(p1.into(), p2.into());
        let wall_id = wall.id;
        let floor_id = floor.id;
        floor.walls.push(wall);
        self.history.push(EditCommand::AddWall { floor_id, wall_id });
        self.commit_change();
        Some(wall_id)
    }

    /// Adds a light mounted above `point`, switched on.
    pub fn add_light(&mut self, point: Vec3) -> Option<Uuid> {
        let floor = self.current_floor_mut()?;
        let position = point + Vec3::new(0.0, LIGHT_MOUNT_HEIGHT, 0.0);
        let light = Light::new(NEW_LIGHT_NAME, position.into());
        let light_id = light.id;
        let floor_id = floor.id;
        floor.lights.push(light);
        self.history.push(EditCommand::AddLight { floor_id, light_id });
        self.commit_change();
        Some(light_id)
    }

    /// Adds a unit cube resting on the floor at `point`.
    pub fn add_cube(&mut self, point: Vec3) -> Option<Uuid> {
        let floor = self.current_floor_mut()?;
        let position = point + Vec3::new(0.0, 0.5, 0.0);
        let cube = Cube::new(position.into(), NEW_CUBE_COLOR);
        let cube_id = cube.id;
        let floor_id = floor.id;
        floor.cubes.push(cube);
        self.history.push(EditCommand::AddCube { floor_id, cube_id });
        self.commit_change();
        Some(cube_id)
    }

    /// Removes the entity behind `source` from its floor.
    pub fn delete(&mut self, source: SourceRef) -> bool {
        self.hover = None;
        let Some(floor) = self.home.as_mut().and_then(|h| h.floor_by_id_mut(source.floor_id)) else {
            return false;
        };
        let floor_id = floor.id;
        let command = match source.entity {
            EntityRef::Wall(id) => remove_by_id(&mut floor.walls, id)
                .map(|(index, wall)| EditCommand::DeleteWall { floor_id, wall, index }),
            EntityRef::Light(id) => remove_by_id(&mut floor.lights, id)
                .map(|(index, light)| EditCommand::DeleteLight { floor_id, light, index }),
            EntityRef::Cube(id) => remove_by_id(&mut floor.cubes, id)
                .map(|(index, cube)| EditCommand::DeleteCube { floor_id, cube, index }),
        };
        let Some(command) = command else {
            return false;
        };
        if self.selection == Some(source) {
            self.selection = None;
        }
        self.history.push(command);
        self.commit_change();
        true
    }

    /// Appends a polygon point, closing the outline when it lands on the
    /// first point.
    pub fn place_floor_point(&mut self, point: Vec3) {
        let EditorMode::FloorPolygon { points } = &mut self.mode else {
            return;
        };
        points.push(point);

        let mut close = false;
        let mut hint = false;
        if points.len() > 2 {
            if planar_distance(point, points[0]) < POLYGON_CLOSE_DISTANCE {
                points.pop();
                close = true;
            }
        } else if points.len() == 1 {
            hint = true;
        }

        if hint {
            self.message("Click loop points. Click start to finish.");
        }
        if !(close && self.finish_floor_polygon()) {
            self.update_cursor(point);
        }
    }

    /// Makes the accumulated points the active floor's outline.
    ///
    /// Needs at least three points; otherwise nothing changes.
    pub fn finish_floor_polygon(&mut self) -> bool {
        if self.mode.polygon_points().len() < 3 || self.current_floor().is_none() {
            return false;
        }
        let EditorMode::FloorPolygon { points } = &mut self.mode else {
            return false;
        };
        let shape: Vec<Point3> = points.drain(..).map(Point3::from).collect();
        self.preview = None;
        if let Some(floor) = self.current_floor_mut() {
            floor.shape = shape;
        }
        self.refresh();
        self.message("Floor shape updated!");
        self.notify(Notification::ContentChanged);
        self.autosave();
        true
    }

    /// Appends the next floor and makes it active.
    pub fn add_floor(&mut self) -> Option<u32> {
        let home = self.home.as_mut()?;
        let level = home.push_floor().level;
        self.current_floor = home.floors.len() - 1;
        self.mode = self.mode.reset();
        self.preview = None;
        self.refresh();
        self.message(format!("Added Floor {level} (Active)"));
        self.notify(Notification::FloorChanged { level });
        self.notify(Notification::ContentChanged);
        self.autosave();
        Some(level)
    }

    /// Moves the active floor by `delta`. Out-of-range targets are ignored.
    pub fn switch_floor(&mut self, delta: i32) -> bool {
        let Some(home) = self.home.as_ref() else {
            return false;
        };
        let Some(index) = self.current_floor.checked_add_signed(delta as isize) else {
            return false;
        };
        if index >= home.floors.len() {
            return false;
        }
        self.current_floor = index;
        self.mode = self.mode.reset();
        self.preview = None;
        self.refresh();
        let level = self.current_level();
        self.message(format!("Floor: {level}"));
        self.notify(Notification::FloorChanged { level });
        self.notify(Notification::ContentChanged);
        self.autosave();
        true
    }

    /// Reverts the most recent edit.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.history.pop() else {
            self.message("Nothing to undo");
            return false;
        };
        let Some(home) = self.home.as_mut() else {
            return false;
        };
        let label = command.label();
        if !command.revert(home) {
            log::warn!("Undo of {label} found nothing to revert");
        }
        if let Some(selection) = self.selection
            && !entity_exists(home, selection)
        {
            self.selection = None;
        }
        self.refresh();
        self.notify(Notification::ContentChanged);
        self.message("Undone!");
        self.autosave();
        true
    }

    /// Property-panel edit of a light's state.
    pub fn set_light_state(&mut self, light_id: Uuid, state: &LightState) -> bool {
        let Some(home) = self.home.as_mut() else {
            return false;
        };
        if !home.update_light_by_id(light_id, state) {
            return false;
        }
        // the recolor must land on the real material, not the highlight
        self.hover = None;
        if let Some(light) = home.light(light_id) {
            self.renderer.update_light(light_id, &light.state);
        }
        self.notify(Notification::ContentChanged);
        self.autosave();
        true
    }

    /// Property-panel edit of a cube (name, position, size, rotation, color).
    ///
    /// Not recorded for undo.
    pub fn update_cube(&mut self, cube_id: Uuid, edit: impl FnOnce(&mut Cube)) -> bool {
        let Some(cube) = self.home.as_mut().and_then(|h| h.cube_mut(cube_id)) else {
            return false;
        };
        edit(cube);
        self.commit_change();
        true
    }

    /// Property-panel edit of a light's name or position.
    pub fn update_light(&mut self, light_id: Uuid, edit: impl FnOnce(&mut Light)) -> bool {
        let Some(light) = self.home.as_mut().and_then(|h| h.light_mut(light_id)) else {
            return false;
        };
        edit(light);
        self.commit_change();
        true
    }

    pub fn rename_light(&mut self, light_id: Uuid, name: &str) -> bool {
        let unchanged = self
            .home
            .as_ref()
            .and_then(|h| h.light(light_id))
            .is_some_and(|l| l.name == name);
        !unchanged && self.update_light(light_id, |light| light.name = name.to_string())
    }

    /// Sets the scene background. Colors that are not `#rrggbb` are rejected.
    pub fn set_background_color(&mut self, color: &str) -> bool {
        if let Err(err) = parse_hex_color(color) {
            log::warn!("{err}");
            return false;
        }
        let Some(home) = self.home.as_mut() else {
            return false;
        };
        if home.background_color == color {
            return false;
        }
        home.background_color = color.to_string();
        self.commit_change();
        true
    }

    fn commit_change(&mut self) {
        self.refresh();
        self.notify(Notification::ContentChanged);
        self.autosave();
    }

    /// Rebuilds drawables and shows floors up to the active one.
    pub fn refresh(&mut self) {
        self.hover = None;
        let level = self.current_level();
        let Some(home) = self.home.as_mut() else {
            return;
        };
        home.normalize_lights();
        self.renderer.render(home);
        self.renderer.set_visible_floor_limit(level, true);
    }

    // ========================================================================
    // Loading & saving
    // ========================================================================

    /// Replaces the edited home. Undo history does not carry over.
    pub fn load_home(&mut self, home: Home) {
        self.home = Some(home);
        self.history.clear();
        self.current_floor = 0;
        self.selection = None;
        self.mode = self.mode.reset();
        self.preview = None;
        self.refresh();
        self.notify(Notification::FloorChanged { level: 0 });
        self.notify(Notification::ContentChanged);
    }

    /// Loads a save from the attached store.
    pub fn load_from_store(&mut self, name: &str) -> bool {
        let Some(store) = self.store.clone() else {
            return false;
        };
        self.message(format!("Loading {name}..."));
        match store.load_home(name).and_then(|home| Ok((save_file_name(name)?, home))) {
            Ok((filename, home)) => {
                self.filename = filename;
                self.load_home(home);
                let text = format!("Loaded {}", self.filename);
                self.message(text);
                true
            }
            Err(err) => {
                log::error!("Loading {name} failed: {err}");
                self.message("Load failed");
                false
            }
        }
    }

    /// Save names in the attached store; empty on failure.
    #[must_use]
    pub fn list_saves(&self) -> Vec<String> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        store.list_saves().unwrap_or_else(|err| {
            log::warn!("Listing saves failed: {err}");
            Vec::new()
        })
    }

    /// Queues a save under `name` (".json" appended when missing).
    ///
    /// Completion is reported by [`poll`](Self::poll).
    pub fn save_as(&mut self, name: &str) -> bool {
        if self.home.is_none() {
            return false;
        }
        let filename = match save_file_name(name) {
            Ok(filename) => filename,
            Err(err) => {
                log::warn!("{err}");
                self.message("Save failed");
                return false;
            }
        };
        self.message(format!("Saving to {filename}..."));
        self.write(filename, SaveOrigin::Explicit);
        true
    }

    fn autosave(&mut self) {
        if !self.settings.autosave {
            return;
        }
        let filename = self.filename.clone();
        self.write(filename, SaveOrigin::Auto);
    }

    fn write(&mut self, filename: String, origin: SaveOrigin) {
        let Some(home) = self.home.as_ref() else {
            return;
        };
        if let Some(saver) = &self.saver {
            if let Err(err) = saver.submit(filename.clone(), home.clone(), origin) {
                log::error!("Could not queue save of {filename}: {err}");
                if origin == SaveOrigin::Explicit {
                    self.message("Save failed");
                }
            }
        } else if let Some(store) = &self.store {
            let result = store.save_home(&filename, home);
            self.handle_outcome(SaveOutcome {
                filename,
                origin,
                result,
            });
        }
    }

    /// Drains finished saves. Returns how many completed.
    pub fn poll(&mut self) -> usize {
        let outcomes = self.saver.as_ref().map(AutoSaver::drain).unwrap_or_default();
        let count = outcomes.len();
        for outcome in outcomes {
            self.handle_outcome(outcome);
        }
        count
    }

    fn handle_outcome(&mut self, outcome: SaveOutcome) {
        match (outcome.origin, outcome.result) {
            (SaveOrigin::Explicit, Ok(())) => {
                self.filename = outcome.filename;
                self.message("Saved!");
            }
            (SaveOrigin::Explicit, Err(err)) => {
                log::error!("Saving {} failed: {err}", outcome.filename);
                self.message("Save failed");
            }
            (SaveOrigin::Auto, Ok(())) => log::debug!("Auto-saved to {}", outcome.filename),
            (SaveOrigin::Auto, Err(err)) => {
                log::warn!("Auto-save to {} failed: {err}", outcome.filename);
            }
        }
    }

    /// Blocks until queued saves are written. For shutdown and tests.
    pub fn flush_saves(&mut self, timeout: std::time::Duration) -> usize {
        let mut count = self.poll();
        if let Some(saver) = &self.saver {
            let mut done = Vec::new();
            while let Some(outcome) = saver.recv_timeout(timeout) {
                done.push(outcome);
            }
            count += done.len();
            for outcome in done {
                self.handle_outcome(outcome);
            }
        }
        count
    }
}

fn entity_exists(home: &Home, source: SourceRef) -> bool {
    let Some(floor) = home.floor_by_id(source.floor_id) else {
        return false;
    };
    match source.entity {
        EntityRef::Wall(id) => floor.wall(id).is_some(),
        EntityRef::Light(id) => floor.light(id).is_some(),
        EntityRef::Cube(id) => floor.cube(id).is_some(),
    }
}
