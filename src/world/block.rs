use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::utils::math::AABB;

/// Handle assigned at insertion. Ids increase monotonically within a world,
/// so comparing ids compares insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed block. Uniform type and appearance; the position is the only data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub grid_position: Vec3,
}

impl Block {
    pub fn new(id: BlockId, grid_position: Vec3) -> Self {
        Self { id, grid_position }
    }

    /// Raycast volume: a cube of edge `block_size` centered on the block.
    pub fn aabb(&self, block_size: f32) -> AABB {
        AABB::cube(self.grid_position, block_size)
    }
}

/// Center of the grid cell containing `value` along one axis.
pub fn snap_to_cell_center(value: f32, block_size: f32) -> f32 {
    (value / block_size).floor() * block_size + block_size / 2.0
}

/// Snaps a placement candidate. The vertical axis is always snapped; x and z
/// only when `snap_horizontal` is set.
pub fn snap_position(point: Vec3, block_size: f32, snap_horizontal: bool) -> Vec3 {
    let y = snap_to_cell_center(point.y, block_size);
    if snap_horizontal {
        Vec3::new(
            snap_to_cell_center(point.x, block_size),
            y,
            snap_to_cell_center(point.z, block_size),
        )
    } else {
        Vec3::new(point.x, y, point.z)
    }
}
