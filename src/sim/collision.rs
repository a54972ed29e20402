//! Rectangle overlap detection
//!
//! The core only acts on overlap events. A host with its own physics reports
//! them directly; a headless host can use [`detect_overlaps`] instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            max: center + size / 2.0,
        }
    }

    /// Touching edges count as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// An overlap the resolver needs to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlap {
    ProjectileHit { projectile: u32, prompt: u32 },
    PromptOnBlock { prompt: u32, block: u32 },
}

/// Find projectile/target and active-prompt/block overlaps
///
/// Each projectile is only checked against its own target. Each prompt
/// reports at most one block, the lowest id it touches.
pub fn detect_overlaps(state: &GameState, tuning: &Tuning) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    let shot_size = Vec2::splat(tuning.projectile_size);
    let block_size = Vec2::splat(tuning.block_size);

    for projectile in &state.projectiles {
        let Some(target) = state.prompt(projectile.target) else {
            continue;
        };
        let shot = Rect::from_center(projectile.pos, shot_size);
        if shot.overlaps(&Rect::from_corner(target.pos, target.size)) {
            overlaps.push(Overlap::ProjectileHit {
                projectile: projectile.id,
                prompt: target.id,
            });
        }
    }

    for prompt in state.prompts.iter().filter(|p| p.is_active()) {
        let bounds = Rect::from_corner(prompt.pos, prompt.size);
        let hit = state
            .blocks
            .iter()
            .filter(|b| b.alive)
            .find(|b| bounds.overlaps(&Rect::from_center(b.pos, block_size)));
        if let Some(block) = hit {
            overlaps.push(Overlap::PromptOnBlock {
                prompt: prompt.id,
                block: block.id,
            });
        }
    }

    overlaps
}
