//! Scene Renderer
//!
//! Turns a [`Home`] into a flat list of [`Drawable`]s for a drawing backend
//! and owns the per-frame animation state that sits on top of it:
//!
//! - [`visibility`]: floor reveal animation, keyed by level
//! - [`occlusion`]: smart-wall lowering, keyed by entity id
//! - [`shadows`]: shadow caster allocation under a fixed cap
//!
//! Every [`SceneRenderer::render`] discards all drawables and rebuilds them.
//! Animation tables survive the rebuild and are re-applied to the new
//! drawables.

pub mod drawable;
pub mod occlusion;
pub mod settings;
pub mod shadows;
pub mod visibility;

use glam::{Mat4, Vec2, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use uuid::Uuid;

use crate::math::{Ray, ray_hits_obb, ray_hits_sphere};
use crate::scene::color::{color_or, rgb};
use crate::scene::{Cube, Floor, FootprintBounds, Home, Light, LightState, Wall};

pub use drawable::{
    Attachment, Drawable, DrawableKey, DrawableKind, EntityRef, Geometry, LightEmitter, Material,
    MaterialSlot, Shading, SourceRef, Transform,
};
pub use occlusion::{OcclusionState, OcclusionTable};
pub use settings::RendererSettings;
pub use shadows::ShadowConfig;
pub use visibility::{FloorTransition, FloorTransitions};

// ============================================================================
// Look constants
// ============================================================================

pub const WALL_COLOR: u32 = 0xe2e8f0;
pub const SLAB_COLOR: u32 = 0x444444;
pub const SLAB_DEPTH: f32 = 0.25;
/// Slab top sits slightly above the floor plane to cover wall bottoms.
pub const SLAB_LIFT: f32 = 0.01;
pub const WINDOW_COLOR: u32 = 0x87ceeb;
pub const WINDOW_OPACITY: f32 = 0.6;
/// Extra depth of a window pane over its wall thickness.
pub const WINDOW_DEPTH_PAD: f32 = 0.1;
pub const GIZMO_RADIUS: f32 = 0.2;
pub const GIZMO_OFF_COLOR: u32 = 0x4a4a4a;
pub const CUBE_FALLBACK_COLOR: u32 = 0xababab;
pub const DEFAULT_BACKGROUND: u32 = 0x222222;

// ============================================================================
// Floor groups & picking
// ============================================================================

/// Transform shared by all drawables of one floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorGroup {
    pub floor_id: Uuid,
    pub level: u32,
    pub base_height: f32,
    pub offset_y: f32,
    pub scale_y: f32,
    pub visible: bool,
}

impl FloorGroup {
    fn new(floor: &Floor) -> Self {
        let base_height = floor.base_height();
        Self {
            floor_id: floor.id,
            level: floor.level,
            base_height,
            offset_y: base_height,
            scale_y: 1.0,
            visible: true,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset_y, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, self.scale_y, 1.0))
    }
}

/// Nearest interactive drawable under a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub key: DrawableKey,
    pub kind: DrawableKind,
    pub source: SourceRef,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy)]
struct LightHandles {
    gizmo: DrawableKey,
    emitter: DrawableKey,
}

// ============================================================================
// SceneRenderer
// ============================================================================

pub struct SceneRenderer {
    settings: RendererSettings,

    drawables: SlotMap<DrawableKey, Drawable>,
    /// Build order, the order backends should draw in.
    order: Vec<DrawableKey>,
    /// Emitters in build order; ties in shadow ranking follow it.
    light_keys: Vec<DrawableKey>,
    lights: FxHashMap<Uuid, LightHandles>,
    groups: Vec<FloorGroup>,

    transitions: FloorTransitions,
    occlusion: OcclusionTable,

    gizmos_visible: bool,
    bounds: Option<FootprintBounds>,
    background: String,
    clear_color: Vec3,
}

impl SceneRenderer {
    #[must_use]
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            settings,
            drawables: SlotMap::with_key(),
            order: Vec::new(),
            light_keys: Vec::new(),
            lights: FxHashMap::default(),
            groups: Vec::new(),
            transitions: FloorTransitions::new(),
            occlusion: OcclusionTable::default(),
            gizmos_visible: true,
            bounds: None,
            background: String::new(),
            clear_color: rgb(DEFAULT_BACKGROUND),
        }
    }

    // ========================================================================
    // Rebuild
    // ========================================================================

    /// Discards every drawable and rebuilds from `home`.
    pub fn render(&mut self, home: &Home) {
        self.drawables.clear();
        self.order.clear();
        self.light_keys.clear();
        self.lights.clear();
        self.groups.clear();

        self.bounds = home.footprint_bounds();

        let mut live = FxHashSet::default();
        for floor in &home.floors {
            self.groups.push(FloorGroup::new(floor));
            if floor.has_slab() {
                self.build_slab(floor);
            }
            for wall in &floor.walls {
                self.build_wall(floor, wall);
                live.insert(wall.id);
            }
            for light in &floor.lights {
                self.build_light(floor, light);
            }
            for cube in &floor.cubes {
                self.build_cube(floor, cube);
                live.insert(cube.id);
            }
        }
        self.occlusion.retain(|id| live.contains(id));

        self.apply_transitions();
        self.apply_occlusion();
        self.set_background(&home.background_color);
        self.rebalance_shadows();

        log::debug!(
            "Rebuilt {} drawables over {} floors",
            self.drawables.len(),
            self.groups.len()
        );
    }

    fn insert(&mut self, drawable: Drawable) -> DrawableKey {
        let key = self.drawables.insert(drawable);
        self.order.push(key);
        key
    }

    fn build_slab(&mut self, floor: &Floor) {
        let outline: Vec<Vec2> = floor.shape.iter().map(|p| p.xz()).collect();
        let mut slab = Drawable::new(
            DrawableKind::Slab,
            Geometry::Slab {
                outline,
                depth: SLAB_DEPTH,
            },
            Transform::from_position(Vec3::new(0.0, SLAB_LIFT, 0.0)),
            Material::lambert(rgb(SLAB_COLOR)),
        );
        slab.receive_shadow = true;
        slab.floor_level = floor.level;
        self.insert(slab);
    }

    fn build_wall(&mut self, floor: &Floor, wall: &Wall) {
        let length = wall.length();
        let mid = wall.midpoint();
        let size = Vec3::new(length, wall.height, wall.thickness);
        let transform =
            Transform::from_position_yaw(Vec3::new(mid.x, wall.height * 0.5, mid.z), wall.angle());

        let mut mesh = Drawable::new(
            DrawableKind::Wall,
            Geometry::Box { size },
            transform,
            Material::lambert(rgb(WALL_COLOR)),
        );
        mesh.receive_shadow = true;
        mesh.floor_level = floor.level;
        mesh.source = Some(SourceRef {
            floor_id: floor.id,
            entity: EntityRef::Wall(wall.id),
        });
        let wall_key = self.insert(mesh);
        self.insert_shadow_proxy(wall_key, floor.level, Geometry::Box { size }, transform);

        let direction = (wall.p2.to_vec3() - wall.p1.to_vec3())
            .with_y(0.0)
            .normalize_or_zero();
        for window in &wall.windows {
            let window_mid = (window.p1.to_vec3() + window.p2.to_vec3()) * 0.5;
            let along = (window_mid - mid).with_y(0.0).dot(direction);
            let y = window.bottom_height + window.height * 0.5 - wall.height * 0.5;
            let mut pane = Drawable::new(
                DrawableKind::Window,
                Geometry::Box {
                    size: Vec3::new(
                        window.width(),
                        window.height,
                        wall.thickness + WINDOW_DEPTH_PAD,
                    ),
                },
                Transform::from_position(Vec3::new(along, y, 0.0)),
                Material::lambert(rgb(WINDOW_COLOR)).with_opacity(WINDOW_OPACITY),
            );
            pane.floor_level = floor.level;
            pane.attachment = Some(Attachment::Child(wall_key));
            self.insert(pane);
        }
    }

    fn insert_shadow_proxy(&mut self, parent: DrawableKey, level: u32, geometry: Geometry, transform: Transform) {
        let mut proxy = Drawable::new(
            DrawableKind::ShadowProxy,
            geometry,
            transform,
            Material::shadow_only(),
        );
        proxy.visible = false;
        proxy.cast_shadow = true;
        proxy.floor_level = level;
        proxy.attachment = Some(Attachment::Mirror(parent));
        self.insert(proxy);
    }

    fn build_light(&mut self, floor: &Floor, light: &Light) {
        let local = light.position.to_vec3() - Vec3::new(0.0, floor.base_height(), 0.0);
        let state = &light.state;

        let mut gizmo = Drawable::new(
            DrawableKind::LightGizmo,
            Geometry::Sphere {
                radius: GIZMO_RADIUS,
            },
            Transform::from_position(local),
            Material::basic(gizmo_color(state)),
        );
        gizmo.visible = self.gizmos_visible;
        gizmo.floor_level = floor.level;
        gizmo.source = Some(SourceRef {
            floor_id: floor.id,
            entity: EntityRef::Light(light.id),
        });
        let gizmo_key = self.insert(gizmo);

        let color = color_or(&state.color, Vec3::ONE);
        let mut point = Drawable::new(
            DrawableKind::PointLight,
            Geometry::None,
            Transform::from_position(local),
            Material::basic(color),
        );
        // shown by the floor transition once the floor is fully up
        point.visible = false;
        point.floor_level = floor.level;
        point.emitter = Some(LightEmitter {
            light_id: light.id,
            color,
            intensity: self.emitter_intensity(state),
            range: self.settings.light_range,
            cast_shadow: false,
            shadow: None,
            shadow_needs_update: false,
        });
        let emitter_key = self.insert(point);

        self.light_keys.push(emitter_key);
        self.lights.insert(
            light.id,
            LightHandles {
                gizmo: gizmo_key,
                emitter: emitter_key,
            },
        );
    }

    fn build_cube(&mut self, floor: &Floor, cube: &Cube) {
        let local = cube.position.to_vec3() - Vec3::new(0.0, floor.base_height(), 0.0);
        let size = cube.size.to_vec3();
        let transform = Transform::from_position_yaw(local, cube.rotation);

        let mut mesh = Drawable::new(
            DrawableKind::Cube,
            Geometry::Box { size },
            transform,
            Material::lambert(color_or(&cube.color, rgb(CUBE_FALLBACK_COLOR))),
        );
        mesh.receive_shadow = true;
        mesh.floor_level = floor.level;
        mesh.source = Some(SourceRef {
            floor_id: floor.id,
            entity: EntityRef::Cube(cube.id),
        });
        let key = self.insert(mesh);
        self.insert_shadow_proxy(key, floor.level, Geometry::Box { size }, transform);
    }

    fn emitter_intensity(&self, state: &LightState) -> f32 {
        if state.on {
            state.sanitized_intensity() * self.settings.intensity_scale
        } else {
            0.0
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// All drawables in build order.
    pub fn drawables(&self) -> impl Iterator<Item = (DrawableKey, &Drawable)> + '_ {
        self.order
            .iter()
            .filter_map(|&key| self.drawables.get(key).map(|d| (key, d)))
    }

    #[must_use]
    pub fn get(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    #[must_use]
    pub fn floor_groups(&self) -> &[FloorGroup] {
        &self.groups
    }

    fn group(&self, level: u32) -> Option<&FloorGroup> {
        self.groups.iter().find(|g| g.level == level)
    }

    /// Footprint of all slab outlines, for camera centering.
    #[must_use]
    pub fn bounds(&self) -> Option<FootprintBounds> {
        self.bounds
    }

    #[must_use]
    pub fn transitions(&self) -> &FloorTransitions {
        &self.transitions
    }

    #[must_use]
    pub fn occlusion(&self) -> &OcclusionTable {
        &self.occlusion
    }

    /// Visible drawable standing for `entity` (never its shadow proxy).
    #[must_use]
    pub fn key_for(&self, entity: &EntityRef) -> Option<DrawableKey> {
        self.drawables().find_map(|(key, d)| {
            let hit = d.kind != DrawableKind::ShadowProxy
                && d.source.is_some_and(|s| s.entity == *entity);
            hit.then_some(key)
        })
    }

    /// Point light drawable for a light id.
    #[must_use]
    pub fn emitter_for(&self, light_id: Uuid) -> Option<DrawableKey> {
        self.lights.get(&light_id).map(|h| h.emitter)
    }

    /// Shared material cell of a drawable, for temporary overrides.
    #[must_use]
    pub fn material_slot(&self, key: DrawableKey) -> Option<MaterialSlot> {
        self.drawables.get(key).map(|d| d.material.clone())
    }

    #[must_use]
    pub fn world_matrix(&self, key: DrawableKey) -> Option<Mat4> {
        let drawable = self.drawables.get(key)?;
        match drawable.attachment {
            Some(Attachment::Mirror(parent)) => self.world_matrix(parent),
            Some(Attachment::Child(parent)) => {
                Some(self.world_matrix(parent)? * drawable.transform.local_matrix())
            }
            None => {
                let group = self
                    .group(drawable.floor_level)
                    .map_or(Mat4::IDENTITY, FloorGroup::matrix);
                Some(group * drawable.transform.local_matrix())
            }
        }
    }

    /// Own flag, floor group and parent all visible.
    #[must_use]
    pub fn is_visible(&self, key: DrawableKey) -> bool {
        let Some(drawable) = self.drawables.get(key) else {
            return false;
        };
        if !drawable.visible || !self.group(drawable.floor_level).is_none_or(|g| g.visible) {
            return false;
        }
        match drawable.attachment {
            Some(Attachment::Child(parent)) => self.is_visible(parent),
            _ => true,
        }
    }

    /// Drawables a backend should render into shadow maps.
    pub fn shadow_geometry(&self) -> impl Iterator<Item = DrawableKey> + '_ {
        self.drawables().filter_map(|(key, d)| {
            let shown = self.group(d.floor_level).is_none_or(|g| g.visible);
            (d.cast_shadow && shown).then_some(key)
        })
    }

    /// Emitters currently allowed to cast shadows, in build order.
    #[must_use]
    pub fn shadow_casters(&self) -> Vec<DrawableKey> {
        self.light_keys
            .iter()
            .copied()
            .filter(|&key| {
                self.drawables
                    .get(key)
                    .and_then(|d| d.emitter.as_ref())
                    .is_some_and(|e| e.cast_shadow)
            })
            .collect()
    }

    /// Called by the backend after it re-rendered the stale shadow maps.
    pub fn clear_shadow_updates(&mut self) {
        for &key in &self.light_keys {
            if let Some(emitter) = self.drawables.get_mut(key).and_then(|d| d.emitter.as_mut()) {
                emitter.shadow_needs_update = false;
            }
        }
    }

    /// Nearest visible interactive drawable hit by `ray`.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<Pick> {
        let mut best: Option<Pick> = None;
        for (key, drawable) in self.drawables() {
            if !drawable.is_interactive() || !self.is_visible(key) {
                continue;
            }
            let Some(source) = drawable.source else {
                continue;
            };
            let Some(world) = self.world_matrix(key) else {
                continue;
            };
            let hit = match &drawable.geometry {
                Geometry::Box { size } => ray_hits_obb(ray, &world, *size),
                Geometry::Sphere { radius } => {
                    ray_hits_sphere(ray, world.transform_point3(Vec3::ZERO), *radius)
                }
                Geometry::Slab { .. } | Geometry::None => None,
            };
            if let Some(distance) = hit
                && best.is_none_or(|b| distance < b.distance)
            {
                best = Some(Pick {
                    key,
                    kind: drawable.kind,
                    source,
                    distance,
                });
            }
        }
        best
    }

    // ========================================================================
    // Display state
    // ========================================================================

    pub fn set_gizmo_visibility(&mut self, visible: bool) {
        self.gizmos_visible = visible;
        for &key in &self.order {
            if let Some(d) = self.drawables.get_mut(key)
                && d.kind == DrawableKind::LightGizmo
            {
                d.visible = visible;
            }
        }
    }

    #[must_use]
    pub fn gizmos_visible(&self) -> bool {
        self.gizmos_visible
    }

    /// Applies a background color. Returns `false` when it is unchanged.
    pub fn set_background(&mut self, color: &str) -> bool {
        if self.background == color {
            return false;
        }
        self.clear_color = color_or(color, self.clear_color);
        self.background = color.to_string();
        true
    }

    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    #[must_use]
    pub fn clear_color(&self) -> Vec3 {
        self.clear_color
    }

    /// Pushes a light's state onto its gizmo and emitter.
    ///
    /// Returns `false` when no drawable exists for `light_id`.
    pub fn update_light(&mut self, light_id: Uuid, state: &LightState) -> bool {
        if !self.apply_light_state(light_id, state) {
            return false;
        }
        self.rebalance_shadows();
        true
    }

    /// Pushes the state of every light in `home`, then rebalances once.
    pub fn update_lights(&mut self, home: &Home) {
        for light in home.floors.iter().flat_map(|f| f.lights.iter()) {
            self.apply_light_state(light.id, &light.state);
        }
        self.rebalance_shadows();
    }

    fn apply_light_state(&mut self, light_id: Uuid, state: &LightState) -> bool {
        let Some(handles) = self.lights.get(&light_id).copied() else {
            return false;
        };
        let intensity = self.emitter_intensity(state);
        let color = color_or(&state.color, Vec3::ONE);

        if let Some(gizmo) = self.drawables.get(handles.gizmo) {
            gizmo.material.borrow_mut().color = gizmo_color(state);
        }

        let lights_shown = self.lights_shown_on(self.drawables.get(handles.emitter).map(|d| d.floor_level));
        if let Some(point) = self.drawables.get_mut(handles.emitter)
            && let Some(emitter) = point.emitter.as_mut()
        {
            emitter.color = color;
            emitter.intensity = intensity;
            point.material.borrow_mut().color = color;
            point.visible = lights_shown && intensity > 0.0;
        }
        true
    }

    fn lights_shown_on(&self, level: Option<u32>) -> bool {
        level
            .and_then(|l| self.transitions.get(l))
            .is_some_and(FloorTransition::lights_shown)
    }

    // ========================================================================
    // Floor visibility
    // ========================================================================

    /// Shows floors up to `max_level` and hides the rest.
    ///
    /// `immediate` snaps the scale (editor); otherwise the change is eased in
    /// by [`animate_floor_transitions`](Self::animate_floor_transitions).
    pub fn set_visible_floor_limit(&mut self, max_level: u32, immediate: bool) {
        let levels: Vec<u32> = self.groups.iter().map(|g| g.level).collect();
        self.transitions.set_limit(levels, max_level, immediate);
        self.apply_transitions();
        self.rebalance_shadows();
    }

    /// One frame of floor easing. Returns `true` while anything is moving.
    pub fn animate_floor_transitions(&mut self) -> bool {
        let moving = self.transitions.animate();
        if moving {
            self.apply_transitions();
            self.rebalance_shadows();
        }
        moving
    }

    /// Greatest level currently shown with a visible scale.
    #[must_use]
    pub fn highest_visible_floor(&self) -> Option<u32> {
        self.groups
            .iter()
            .filter(|g| g.visible && g.scale_y > visibility::HIDE_BELOW)
            .map(|g| g.level)
            .max()
    }

    fn apply_transitions(&mut self) {
        for group in &mut self.groups {
            match self.transitions.get(group.level) {
                Some(state) => {
                    group.scale_y = state.current;
                    group.offset_y = group.base_height * state.current;
                    group.visible = state.visible;
                }
                None => {
                    group.scale_y = 1.0;
                    group.offset_y = group.base_height;
                    group.visible = true;
                }
            }
        }

        for &key in &self.light_keys {
            let Some(level) = self.drawables.get(key).map(|d| d.floor_level) else {
                continue;
            };
            let shown = self.lights_shown_on(Some(level));
            if let Some(point) = self.drawables.get_mut(key) {
                let emitting = point.emitter.as_ref().is_some_and(|e| e.intensity > 0.0);
                point.visible = shown && emitting;
            }
        }
    }

    // ========================================================================
    // Smart walls
    // ========================================================================

    /// Lowers walls and cubes standing between the camera and `target`.
    ///
    /// Only objects on `target_floor` participate (all shown floors when
    /// `None`); everything else is reset to full height.
    pub fn update_smart_walls(&mut self, camera_position: Vec3, target: Vec3, target_floor: Option<u32>) {
        let to_target = target - camera_position;
        let view_dir = to_target.normalize_or_zero();
        let threshold_center = to_target.length() - occlusion::THRESHOLD_OFFSET;

        let candidates: Vec<(DrawableKey, Uuid, u32)> = self
            .drawables()
            .filter(|(_, d)| matches!(d.kind, DrawableKind::Wall | DrawableKind::Cube))
            .filter_map(|(key, d)| Some((key, d.source?.entity.id(), d.floor_level)))
            .collect();

        for (key, id, level) in candidates {
            let floor_shown = self.group(level).is_some_and(|g| g.visible);
            let targeted = target_floor.is_none_or(|t| t == level);
            let center = if floor_shown && targeted {
                self.world_matrix(key).map(|m| m.transform_point3(Vec3::ZERO))
            } else {
                None
            };

            let state = self.occlusion.entry(id);
            match center {
                Some(center) => {
                    let projection = (center - camera_position).dot(view_dir);
                    state.step(projection, threshold_center);
                }
                None => state.reset(),
            }
            let scale = state.scale;
            self.apply_scale(key, scale);
        }
    }

    fn apply_occlusion(&mut self) {
        let scaled: Vec<(DrawableKey, f32)> = self
            .drawables()
            .filter_map(|(key, d)| {
                let id = d.source?.entity.id();
                let state = self.occlusion.get(id)?;
                matches!(d.kind, DrawableKind::Wall | DrawableKind::Cube).then_some((key, state.scale))
            })
            .collect();
        for (key, scale) in scaled {
            self.apply_scale(key, scale);
        }
    }

    fn apply_scale(&mut self, key: DrawableKey, scale: f32) {
        let Some(drawable) = self.drawables.get_mut(key) else {
            return;
        };
        let Geometry::Box { size } = drawable.geometry else {
            return;
        };
        let rest = drawable.rest;
        drawable.transform.scale.y = rest.scale.y * scale;
        drawable.transform.position.y = occlusion::lowered_center_y(rest.position.y, size.y, scale);
    }

    // ========================================================================
    // Shadows
    // ========================================================================

    /// Recomputes which emitters cast shadows. Returns the caster count.
    pub fn rebalance_shadows(&mut self) -> usize {
        let candidates: Vec<(DrawableKey, f32)> = self
            .light_keys
            .iter()
            .filter(|&&key| self.is_visible(key))
            .filter_map(|&key| {
                let emitter = self.drawables.get(key)?.emitter.as_ref()?;
                Some((key, emitter.intensity))
            })
            .collect();
        let casters = shadows::select_casters(&candidates, self.settings.shadow_caster_cap);

        let mut flipped = 0;
        for &key in &self.light_keys {
            let cast = casters.contains(&key);
            if let Some(emitter) = self.drawables.get_mut(key).and_then(|d| d.emitter.as_mut())
                && shadows::apply_caster_flag(emitter, cast, &self.settings)
            {
                flipped += 1;
            }
        }
        if flipped > 0 {
            log::debug!("Shadow casters: {} ({} changed)", casters.len(), flipped);
        }
        casters.len()
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(RendererSettings::default())
    }
}

fn gizmo_color(state: &LightState) -> Vec3 {
    if state.on {
        color_or(&state.color, Vec3::ONE)
    } else {
        rgb(GIZMO_OFF_COLOR)
    }
}
