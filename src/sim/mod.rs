//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `Session::tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or input dependencies

pub mod collision;
pub mod grid;
pub mod prompt;
pub mod rng;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

mod resolve;
mod spawn;

pub use collision::{Overlap, Rect, detect_overlaps};
pub use prompt::{Prompt, PromptKind, PromptState, base_score, hit_score};
pub use rng::GameRng;
pub use schedule::{Scheduler, SpawnWindow, SpawnWindows, Timer, TimerAction};
pub use session::Session;
pub use state::{GameEvent, GamePhase, GameState, GroundBlock, Playfield, Projectile};
pub use tick::advance_motion;
