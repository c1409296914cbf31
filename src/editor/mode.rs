use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tool identifiers as used by toolbars and saved UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    None,
    Wall,
    Light,
    Cube,
    FloorPoly,
    Delete,
}

impl ToolKind {
    /// Parses a toolbar identifier.
    #[must_use]
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "view" => Some(Self::None),
            "wall" => Some(Self::Wall),
            "light" => Some(Self::Light),
            "cube" => Some(Self::Cube),
            "floor_poly" | "floorpoly" => Some(Self::FloorPoly),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_string(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Wall => "wall",
            Self::Light => "light",
            Self::Cube => "cube",
            Self::FloorPoly => "floor_poly",
            Self::Delete => "delete",
        }
    }
}

/// Active tool together with its in-progress data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    None,
    Wall {
        pending_start: Option<Vec3>,
    },
    Light,
    Cube,
    FloorPolygon {
        points: Vec<Vec3>,
    },
    Delete,
}

impl EditorMode {
    /// Fresh mode for `kind`, with no pending data.
    #[must_use]
    pub fn enter(kind: ToolKind) -> Self {
        match kind {
            ToolKind::None => Self::None,
            ToolKind::Wall => Self::Wall {
                pending_start: None,
            },
            ToolKind::Light => Self::Light,
            ToolKind::Cube => Self::Cube,
            ToolKind::FloorPoly => Self::FloorPolygon { points: Vec::new() },
            ToolKind::Delete => Self::Delete,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::None => ToolKind::None,
            Self::Wall { .. } => ToolKind::Wall,
            Self::Light => ToolKind::Light,
            Self::Cube => ToolKind::Cube,
            Self::FloorPolygon { .. } => ToolKind::FloorPoly,
            Self::Delete => ToolKind::Delete,
        }
    }

    /// Same tool, pending data dropped.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::enter(self.kind())
    }

    #[must_use]
    pub fn is_tool_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub fn pending_wall_start(&self) -> Option<Vec3> {
        match self {
            Self::Wall { pending_start } => *pending_start,
            _ => None,
        }
    }

    #[must_use]
    pub fn polygon_points(&self) -> &[Vec3] {
        match self {
            Self::FloorPolygon { points } => points,
            _ => &[],
        }
    }
}
