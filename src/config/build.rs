use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Block placement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub block_size: f32,
    /// Distance along the aim ray at which new blocks are placed.
    pub placement_distance: f32,
    /// A toggle removes any block strictly closer than this to the candidate.
    pub proximity_threshold: f32,
    /// Snap x/z to the grid as well as y. Off by default: only the vertical
    /// axis is snapped.
    pub snap_horizontal: bool,
    pub initial_blocks: Vec<Vec3>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            block_size: 2.0,
            placement_distance: 5.0,
            proximity_threshold: 1.0,
            snap_horizontal: false,
            initial_blocks: Vec::new(),
        }
    }
}
