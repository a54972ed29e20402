//! Word Rain - a falling-word vocabulary shooter
//!
//! Words fall toward a floor of blocks; typing the right conjugation shoots
//! them down before they smash the ground.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ground, prompts, timers, hits, levels)
//! - `vocab`: Verb tables the prompts are drawn from
//! - `hooks`: Capabilities the host injects (notifications, speech)
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod hooks;
pub mod sim;
pub mod tuning;
pub mod vocab;

pub use error::GameError;
pub use hooks::{HookError, NoopHooks, SessionHooks, SpeechOutput};
pub use sim::{GameEvent, GamePhase, Session};
pub use tuning::{InputMode, Tuning};
pub use vocab::{JsonVocabulary, VocabEntry, Vocabulary};

/// Host loop constants
pub mod consts {
    /// Frame length a headless host steps with (~60 Hz)
    pub const FRAME_MS: u32 = 16;
}
