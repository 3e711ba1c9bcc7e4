use glam::Vec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::block::{snap_position, Block, BlockId};
use super::spatial::SpatialIndex;
use crate::config::BuildConfig;
use crate::utils::math::Ray;

/// Change to the block set, forwarded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlockEvent {
    Added(Block),
    Removed(Block),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestroyResult {
    Removed(Block),
    NoHit,
}

impl DestroyResult {
    pub fn event(self) -> Option<BlockEvent> {
        match self {
            DestroyResult::Removed(block) => Some(BlockEvent::Removed(block)),
            DestroyResult::NoHit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToggleResult {
    Added(Block),
    Removed(Block),
}

impl From<ToggleResult> for BlockEvent {
    fn from(result: ToggleResult) -> Self {
        match result {
            ToggleResult::Added(block) => BlockEvent::Added(block),
            ToggleResult::Removed(block) => BlockEvent::Removed(block),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub block: Block,
    pub distance: f32,
}

/// Owns every placed block. Blocks are kept in insertion order, which is
/// also ascending id order.
#[derive(Debug, Clone)]
pub struct BlockWorld {
    blocks: Vec<Block>,
    index: SpatialIndex,
    next_id: u64,
    block_size: f32,
    placement_distance: f32,
    proximity_threshold: f32,
    snap_horizontal: bool,
}

impl BlockWorld {
    pub fn new(config: &BuildConfig) -> Self {
        let mut world = Self {
            blocks: Vec::new(),
            index: SpatialIndex::new(config.proximity_threshold),
            next_id: 0,
            block_size: config.block_size,
            placement_distance: config.placement_distance,
            proximity_threshold: config.proximity_threshold,
            snap_horizontal: config.snap_horizontal,
        };

        for &position in &config.initial_blocks {
            let snapped = world.snap(position);
            if let Some(existing) = world.find_near(snapped) {
                warn!(
                    "Skipping initial block at {:?}: overlaps block {} at {:?}",
                    snapped, existing.id, existing.grid_position
                );
                continue;
            }
            world.insert(snapped);
        }

        world
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in insertion order.
    pub fn iter_blocks(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.position_of(id).map(|slot| &self.blocks[slot])
    }

    fn position_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.binary_search_by_key(&id, |block| block.id).ok()
    }

    fn snap(&self, point: Vec3) -> Vec3 {
        snap_position(point, self.block_size, self.snap_horizontal)
    }

    /// Where a toggle along `ray` would place a block. The point sits a fixed
    /// distance along the ray regardless of any blocks in between.
    pub fn placement_point(&self, ray: &Ray) -> Vec3 {
        self.snap(ray.at(self.placement_distance))
    }

    /// Nearest block hit by `ray`. Equal distances go to the earliest block.
    pub fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let mut nearest: Option<RaycastHit> = None;
        for block in &self.blocks {
            let Some(distance) = ray.intersect_aabb(&block.aabb(self.block_size)) else {
                continue;
            };
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RaycastHit {
                    block: *block,
                    distance,
                });
            }
        }
        nearest
    }

    pub fn raycast_destroy(&mut self, ray: &Ray) -> DestroyResult {
        let Some(hit) = self.raycast(ray) else {
            debug!("Shot fired, no block hit");
            return DestroyResult::NoHit;
        };

        match self.remove(hit.block.id) {
            Some(block) => {
                debug!(
                    "Block {} destroyed at {:?} (distance {:.2})",
                    block.id, block.grid_position, hit.distance
                );
                DestroyResult::Removed(block)
            }
            None => DestroyResult::NoHit,
        }
    }

    pub fn raycast_toggle(&mut self, ray: &Ray) -> ToggleResult {
        let candidate = self.placement_point(ray);

        if let Some(existing) = self.find_near(candidate) {
            if let Some(block) = self.remove(existing.id) {
                debug!("Block {} removed at {:?}", block.id, block.grid_position);
                return ToggleResult::Removed(block);
            }
        }

        let block = self.insert(candidate);
        debug!("Block {} placed at {:?}", block.id, block.grid_position);
        ToggleResult::Added(block)
    }

    /// Earliest-inserted block strictly within the proximity threshold.
    pub fn find_near(&self, point: Vec3) -> Option<Block> {
        self.index
            .first_within(point, self.proximity_threshold)
            .and_then(|id| self.get(id).copied())
    }

    fn insert(&mut self, grid_position: Vec3) -> Block {
        let block = Block::new(BlockId(self.next_id), grid_position);
        self.next_id += 1;
        self.index.insert(block.id, block.grid_position);
        self.blocks.push(block);
        block
    }

    fn remove(&mut self, id: BlockId) -> Option<Block> {
        let slot = self.position_of(id)?;
        let block = self.blocks.remove(slot);
        self.index.remove(block.id, block.grid_position);
        Some(block)
    }
}
