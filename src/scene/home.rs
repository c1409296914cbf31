use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cube::Cube;
use super::light::{Light, LightState};
use super::point::Point3;
use super::wall::Wall;
use super::FLOOR_HEIGHT;

// ============================================================================
// Entity addressing
// ============================================================================

/// Anything stored in a floor list and addressed by a stable id.
pub trait Entity {
    fn id(&self) -> Uuid;
}

impl Entity for Wall {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Light {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Cube {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Removes the entity with `id`, returning it with the index it occupied.
pub fn remove_by_id<T: Entity>(list: &mut Vec<T>, id: Uuid) -> Option<(usize, T)> {
    let index = list.iter().position(|e| e.id() == id)?;
    Some((index, list.remove(index)))
}

/// Inserts at `index`, clamped to the list length.
pub fn insert_clamped<T>(list: &mut Vec<T>, index: usize, item: T) {
    let index = index.min(list.len());
    list.insert(index, item);
}

// ============================================================================
// Floor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub cubes: Vec<Cube>,
    /// Slab outline. Fewer than three points means no slab.
    #[serde(default)]
    pub shape: Vec<Point3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_image: Option<String>,
}

impl Floor {
    #[must_use]
    pub fn new(level: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            name: format!("Floor {level}"),
            walls: Vec::new(),
            lights: Vec::new(),
            cubes: Vec::new(),
            shape: Vec::new(),
            floor_plan_image: None,
        }
    }

    /// World height of this floor's plane.
    #[inline]
    #[must_use]
    pub fn base_height(&self) -> f32 {
        self.level as f32 * FLOOR_HEIGHT
    }

    #[must_use]
    pub fn has_slab(&self) -> bool {
        self.shape.len() >= 3
    }

    #[must_use]
    pub fn wall(&self, id: Uuid) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    #[must_use]
    pub fn light(&self, id: Uuid) -> Option<&Light> {
        self.lights.iter().find(|l| l.id == id)
    }

    pub fn light_mut(&mut self, id: Uuid) -> Option<&mut Light> {
        self.lights.iter_mut().find(|l| l.id == id)
    }

    #[must_use]
    pub fn cube(&self, id: Uuid) -> Option<&Cube> {
        self.cubes.iter().find(|c| c.id == id)
    }

    pub fn cube_mut(&mut self, id: Uuid) -> Option<&mut Cube> {
        self.cubes.iter_mut().find(|c| c.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.lights.is_empty() && self.cubes.is_empty()
    }
}

// ============================================================================
// Home
// ============================================================================

/// Root persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_home_name")]
    pub name: String,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

fn default_home_name() -> String {
    "My Home".to_string()
}

fn default_background() -> String {
    "#222222".to_string()
}

impl Default for Home {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: default_home_name(),
            background_color: default_background(),
            floors: Vec::new(),
        }
    }
}

/// Axis-aligned extent of every floor outline on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl FootprintBounds {
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[must_use]
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }
}

impl Home {
    /// A home with a single empty ground floor.
    #[must_use]
    pub fn with_ground_floor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            floors: vec![Floor::new(0)],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn floor_by_id(&self, id: Uuid) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn floor_by_id_mut(&mut self, id: Uuid) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.id == id)
    }

    #[must_use]
    pub fn floor_by_level(&self, level: u32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.level == level)
    }

    /// Highest level present, `0` for a home without floors.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.floors.iter().map(|f| f.level).max().unwrap_or(0)
    }

    /// Appends the next floor (`max_level + 1`, or `0` for the first one).
    pub fn push_floor(&mut self) -> &mut Floor {
        let level = if self.floors.is_empty() {
            0
        } else {
            self.max_level() + 1
        };
        self.floors.push(Floor::new(level));
        let last = self.floors.len() - 1;
        &mut self.floors[last]
    }

    pub fn light_mut(&mut self, id: Uuid) -> Option<&mut Light> {
        self.floors.iter_mut().find_map(|f| f.light_mut(id))
    }

    #[must_use]
    pub fn light(&self, id: Uuid) -> Option<&Light> {
        self.floors.iter().find_map(|f| f.light(id))
    }

    pub fn cube_mut(&mut self, id: Uuid) -> Option<&mut Cube> {
        self.floors.iter_mut().find_map(|f| f.cube_mut(id))
    }

    #[must_use]
    pub fn cube(&self, id: Uuid) -> Option<&Cube> {
        self.floors.iter().find_map(|f| f.cube(id))
    }

    /// Replaces a light's state. Returns `false` for an unknown id or when the
    /// state is already equal, so repeated deliveries have no effect.
    pub fn update_light_by_id(&mut self, id: Uuid, state: &LightState) -> bool {
        let Some(light) = self.light_mut(id) else {
            log::debug!("No light with id {id}");
            return false;
        };
        let mut incoming = state.clone();
        incoming.normalize_intensity();
        if light.state == incoming {
            return false;
        }
        light.state = incoming;
        true
    }

    /// Repairs every stored light intensity. Returns how many were fixed.
    pub fn normalize_lights(&mut self) -> usize {
        self.floors
            .iter_mut()
            .flat_map(|f| f.lights.iter_mut())
            .map(|l| l.state.normalize_intensity())
            .filter(|&fixed| fixed)
            .count()
    }

    /// Bounds over all slab outline points, `None` when no floor has a slab.
    #[must_use]
    pub fn footprint_bounds(&self) -> Option<FootprintBounds> {
        let mut points = self
            .floors
            .iter()
            .filter(|f| f.has_slab())
            .flat_map(|f| f.shape.iter())
            .map(|p| p.xz());
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(FootprintBounds { min, max })
    }
}
