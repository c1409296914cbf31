//! Drawable arena entries
//!
//! A [`Drawable`] is the backend-facing description of one object: geometry,
//! local transform, material, shadow flags and an optional light emitter.
//! Drawables are recreated on every rebuild; keys are generational, so a key
//! held across a rebuild never resolves to a newer drawable.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Quat, Vec2, Vec3};
use slotmap::new_key_type;
use uuid::Uuid;

use super::shadows::ShadowConfig;

new_key_type! {
    pub struct DrawableKey;
}

// ============================================================================
// Back-references
// ============================================================================

/// Identity of the model entity a drawable stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Wall(Uuid),
    Light(Uuid),
    Cube(Uuid),
}

impl EntityRef {
    #[must_use]
    pub fn id(&self) -> Uuid {
        match *self {
            Self::Wall(id) | Self::Light(id) | Self::Cube(id) => id,
        }
    }
}

/// Non-owning link from a drawable to its entity and owning floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRef {
    pub floor_id: Uuid,
    pub entity: EntityRef,
}

// ============================================================================
// Transform & geometry
// ============================================================================

/// Local TRS relative to the owning floor group (or parent drawable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Position plus a rotation about +Y.
    #[must_use]
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
            scale: Vec3::ONE,
        }
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box of `size`, centered at the local origin.
    Box { size: Vec3 },
    Sphere { radius: f32 },
    /// Outline on the ground plane extruded downward by `depth`.
    Slab { outline: Vec<Vec2>, depth: f32 },
    /// No surface, e.g. a point light emitter.
    None,
}

// ============================================================================
// Materials
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Unlit flat color.
    Basic,
    /// Diffuse only, cheap with many lights.
    Lambert,
    /// Writes depth to shadow maps only.
    ShadowOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
}

impl Material {
    #[must_use]
    pub fn lambert(color: Vec3) -> Self {
        Self {
            shading: Shading::Lambert,
            color,
            opacity: 1.0,
            transparent: false,
        }
    }

    #[must_use]
    pub fn basic(color: Vec3) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            opacity: 1.0,
            transparent: false,
        }
    }

    #[must_use]
    pub fn shadow_only() -> Self {
        Self {
            shading: Shading::ShadowOnly,
            color: Vec3::ZERO,
            opacity: 1.0,
            transparent: false,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }
}

/// Shared, swappable material cell.
pub type MaterialSlot = Rc<RefCell<Material>>;

// ============================================================================
// Drawable
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    Slab,
    Wall,
    Window,
    Cube,
    /// Bulb sphere shown while editing.
    LightGizmo,
    PointLight,
    /// Invisible shadow-casting copy of a wall or cube.
    ShadowProxy,
}

/// How a drawable's world matrix derives from another drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Uses the parent's world matrix unchanged.
    Mirror(DrawableKey),
    /// Local transform is expressed in the parent's space.
    Child(DrawableKey),
}

/// Point light parameters carried by a [`DrawableKind::PointLight`] drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct LightEmitter {
    pub light_id: Uuid,
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub cast_shadow: bool,
    pub shadow: Option<ShadowConfig>,
    /// Set when the shadow map must be re-rendered.
    pub shadow_needs_update: bool,
}

#[derive(Debug, Clone)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub geometry: Geometry,
    pub transform: Transform,
    /// Transform as built, before any animation.
    pub rest: Transform,
    pub material: MaterialSlot,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub floor_level: u32,
    pub source: Option<SourceRef>,
    pub attachment: Option<Attachment>,
    pub emitter: Option<LightEmitter>,
}

impl Drawable {
    #[must_use]
    pub fn new(kind: DrawableKind, geometry: Geometry, transform: Transform, material: Material) -> Self {
        Self {
            kind,
            geometry,
            transform,
            rest: transform,
            material: Rc::new(RefCell::new(material)),
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            floor_level: 0,
            source: None,
            attachment: None,
            emitter: None,
        }
    }

    /// Eligible for pointer hit-testing.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.source.is_some() && self.kind != DrawableKind::ShadowProxy
    }

    /// A clone of the current material.
    #[must_use]
    pub fn material(&self) -> Material {
        self.material.borrow().clone()
    }
}
