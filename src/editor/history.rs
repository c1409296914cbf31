//! Undo history
//!
//! Each model mutation records one [`EditCommand`] holding what is needed to
//! reverse it: ids for additions, deep copies plus original index for
//! deletions.

use uuid::Uuid;

use crate::scene::home::{insert_clamped, remove_by_id};
use crate::scene::{Cube, Home, Light, Wall};

#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    AddWall { floor_id: Uuid, wall_id: Uuid },
    AddLight { floor_id: Uuid, light_id: Uuid },
    AddCube { floor_id: Uuid, cube_id: Uuid },
    DeleteWall { floor_id: Uuid, wall: Wall, index: usize },
    DeleteLight { floor_id: Uuid, light: Light, index: usize },
    DeleteCube { floor_id: Uuid, cube: Cube, index: usize },
}

impl EditCommand {
    #[must_use]
    pub fn floor_id(&self) -> Uuid {
        match self {
            Self::AddWall { floor_id, .. }
            | Self::AddLight { floor_id, .. }
            | Self::AddCube { floor_id, .. }
            | Self::DeleteWall { floor_id, .. }
            | Self::DeleteLight { floor_id, .. }
            | Self::DeleteCube { floor_id, .. } => *floor_id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddWall { .. } => "add wall",
            Self::AddLight { .. } => "add light",
            Self::AddCube { .. } => "add cube",
            Self::DeleteWall { .. } => "delete wall",
            Self::DeleteLight { .. } => "delete light",
            Self::DeleteCube { .. } => "delete cube",
        }
    }

    /// Applies the inverse of this command to `home`.
    ///
    /// Returns `false` if the owning floor no longer exists or the entity was
    /// already gone.
    pub fn revert(self, home: &mut Home) -> bool {
        let Some(floor) = home.floor_by_id_mut(self.floor_id()) else {
            return false;
        };
        match self {
            Self::AddWall { wall_id, .. } => remove_by_id(&mut floor.walls, wall_id).is_some(),
            Self::AddLight { light_id, .. } => remove_by_id(&mut floor.lights, light_id).is_some(),
            Self::AddCube { cube_id, .. } => remove_by_id(&mut floor.cubes, cube_id).is_some(),
            Self::DeleteWall { wall, index, .. } => {
                insert_clamped(&mut floor.walls, index, wall);
                true
            }
            Self::DeleteLight { light, index, .. } => {
                insert_clamped(&mut floor.lights, index, light);
                true
            }
            Self::DeleteCube { cube, index, .. } => {
                insert_clamped(&mut floor.cubes, index, cube);
                true
            }
        }
    }
}

/// Unbounded LIFO of recorded commands.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    commands: Vec<EditCommand>,
}

impl UndoStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: EditCommand) {
        log::debug!("Recorded {}", command.label());
        self.commands.push(command);
    }

    pub fn pop(&mut self) -> Option<EditCommand> {
        self.commands.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
