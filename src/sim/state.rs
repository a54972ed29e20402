//! Game state and core simulation types
//!
//! Everything a session needs to replay deterministically lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid;
use super::prompt::{Prompt, PromptKind, PromptState};
use super::rng::GameRng;
use super::schedule::{Scheduler, SpawnWindow, SpawnWindows};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ground built, level not started yet
    Setup,
    /// Counting down to the level start
    Countdown,
    /// Prompts spawning, level timer running
    Running,
    /// Level timer ran out, cleanup done, next level not started yet
    LevelComplete,
    /// Ground destroyed
    GameOver,
}

/// Area prompts play in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    /// Ground line
    pub bottom: f32,
}

impl Playfield {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let side = tuning.effective_side_width();
        let left = tuning.origin_x + side;
        Self {
            left,
            right: left + tuning.width - side * 2.0,
            top: tuning.origin_y,
            bottom: tuning.height - tuning.floor_offset,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// A destructible ground tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundBlock {
    pub id: u32,
    pub column: u32,
    /// 0 is the lowest row
    pub row: u32,
    /// Center point
    pub pos: Vec2,
    /// Smashed blocks stay in the list with `alive` cleared
    pub alive: bool,
}

/// A shot flying at a matched prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Prompt id; the prompt may already be gone
    pub target: u32,
    /// Center point, launched from the ground line below the target
    pub pos: Vec2,
}

/// Things the host may want to react to (sound, text, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarting { level: u32, countdown: u32 },
    CountdownTick { level: u32, remaining: u32 },
    LevelRunning { level: u32 },
    PromptSpawned { id: u32, kind: PromptKind },
    Fired { projectile: u32, prompt: u32 },
    /// Answer matched nothing
    Miss { text: String },
    PromptHit { id: u32, answer: String, points: u64, bonus: bool },
    BlockSmashed { block: u32, prompt: u32, remaining: usize },
    /// Prompt left the playfield unanswered
    PromptEscaped { id: u32 },
    PromptRemoved { id: u32, answer: String },
    LevelComplete { level: u32, score: u64 },
    GameOver { score: u64 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: GameRng,
    /// 1-based level number
    pub level: u32,
    pub score: u64,
    pub phase: GamePhase,
    /// Timer that ends the running level
    pub level_timer: Option<u32>,
    /// px/s for regular falling prompts
    pub falling_speed: f32,
    pub bonus_falling_speed: f32,
    pub windows: SpawnWindows,
    pub timers: Scheduler,
    pub playfield: Playfield,
    /// Ground blocks (sorted by id)
    pub blocks: Vec<GroundBlock>,
    /// Prompts in play, Active or Resolving (sorted by id)
    pub prompts: Vec<Prompt>,
    pub projectiles: Vec<Projectile>,
    /// Undrained events for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new state with the starting ground already generated
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let bonus = SpawnWindow::new(tuning.bonus_window, tuning.bonus_window_shrink);
        let mut state = Self {
            seed,
            rng: GameRng::new(seed),
            level: 1,
            score: 0,
            phase: GamePhase::Setup,
            level_timer: None,
            falling_speed: tuning.start_falling_speed,
            bonus_falling_speed: tuning.start_bonus_falling_speed,
            windows: SpawnWindows {
                falling: SpawnWindow::new(tuning.falling_window, tuning.falling_window_shrink),
                bonus_drift: bonus,
                bonus_falling: bonus,
            },
            timers: Scheduler::new(),
            playfield: Playfield::from_tuning(tuning),
            blocks: Vec::new(),
            prompts: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        let first_id = state.next_id;
        state.blocks = grid::generate(
            &mut state.rng,
            tuning.starting_blocks,
            &state.playfield,
            tuning.block_size,
            first_id,
        );
        state.next_id += state.blocks.len() as u32;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn prompt(&self, id: u32) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn prompt_mut(&mut self, id: u32) -> Option<&mut Prompt> {
        self.prompts.iter_mut().find(|p| p.id == id)
    }

    pub fn active_prompt_count(&self) -> usize {
        self.prompts
            .iter()
            .filter(|p| p.state == PromptState::Active)
            .count()
    }

    pub fn remaining_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// x of every surviving block, for lining prompts up over them
    pub fn surviving_columns(&self) -> Vec<f32> {
        self.blocks
            .iter()
            .filter(|b| b.alive)
            .map(|b| b.pos.x)
            .collect()
    }

    /// Time left on the running level, zero outside Running
    pub fn level_time_remaining_ms(&self) -> u64 {
        self.level_timer
            .and_then(|id| self.timers.remaining_ms(id))
            .unwrap_or(0)
    }

    pub fn speed_for(&self, kind: PromptKind) -> f32 {
        match kind {
            PromptKind::BonusFalling => self.bonus_falling_speed,
            _ => self.falling_speed,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.blocks.sort_by_key(|b| b.id);
        self.prompts.sort_by_key(|p| p.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
