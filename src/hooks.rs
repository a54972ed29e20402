//! Host capabilities injected into a session
//!
//! The core never calls into the UI or audio directly. Everything it needs to
//! tell the host goes through these traits, handed over at construction.

use std::fmt;

/// Failure reported by a host notification callback
///
/// The core logs these and carries on; they never interrupt prompt removal
/// or level progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError(pub String);

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host callback failed: {}", self.0)
    }
}

impl std::error::Error for HookError {}

/// Notifications for the input collaborator and the game shell
pub trait SessionHooks {
    /// Final score once the ground has been destroyed
    fn on_game_over(&mut self, _score: u64) {}

    /// A prompt was picked by pointer; the input line should show its answer
    fn on_text_selected(&mut self, _answer: &str) -> Result<(), HookError> {
        Ok(())
    }

    /// A prompt left play; any selection showing this answer should clear
    fn on_text_removed(&mut self, _answer: &str) -> Result<(), HookError> {
        Ok(())
    }

    /// Level ended; the input line should be emptied
    fn on_selection_cleared(&mut self) -> Result<(), HookError> {
        Ok(())
    }
}

/// Hooks that ignore everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}

/// Text-to-speech for reading out matched answers
pub trait SpeechOutput {
    fn is_speaking(&self) -> bool {
        false
    }

    fn speak(&mut self, text: &str);
}

/// Log a swallowed hook failure
pub(crate) fn report(result: Result<(), HookError>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what}: {err}");
    }
}
