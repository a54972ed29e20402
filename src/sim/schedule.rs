//! One-shot timers and spawn windows
//!
//! Time only moves when the session moves the clock. Due timers are handed out
//! one at a time, so a callback can cancel everything else before the next
//! one runs.

use serde::{Deserialize, Serialize};

use super::prompt::PromptKind;
use super::rng::GameRng;
use crate::tuning::DelayRange;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Spawn a prompt; `rearm` schedules the next one of the same kind
    Spawn { kind: PromptKind, rearm: bool },
    /// Remove a prompt whose reveal delay is over
    RemovePrompt(u32),
    /// Level-start countdown, `remaining` ticks to go
    Countdown { remaining: u32 },
    /// Level time is up
    LevelEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub id: u32,
    pub due_ms: u64,
    pub action: TimerAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u32,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm a one-shot timer. Zero delays fire on the next advance.
    pub fn arm(&mut self, delay_ms: u32, action: TimerAction) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms.max(1) as u64,
            action,
        });
        id
    }

    /// Drop every pending timer, returning how many there were
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Move the clock forward to `until` (never backwards)
    pub fn advance_to(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }

    /// When the earliest pending timer is due
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Take the earliest timer due by `until` (ties by arm order) and move the
    /// clock to its due time, so anything it arms is measured from when it
    /// fired
    pub fn pop_due_by(&mut self, until: u64) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Milliseconds until a timer fires
    pub fn remaining_ms(&self, id: u32) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }
}

/// Level-scaled delay range for one prompt category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWindow {
    pub from: u32,
    pub to: u32,
    /// Fraction both bounds shrink by per level
    pub shrink: f32,
}

impl SpawnWindow {
    pub fn new(range: DelayRange, shrink: f32) -> Self {
        Self {
            from: range.from,
            to: range.to,
            shrink,
        }
    }

    pub fn draw(&self, rng: &mut GameRng) -> u32 {
        rng.between(self.from, self.to)
    }

    /// Shrink both bounds for the next level, keeping `from < to`
    pub fn scale(&mut self, gap_ms: u32) {
        self.from -= (self.from as f32 * self.shrink).round() as u32;
        self.to -= (self.to as f32 * self.shrink).round() as u32;
        if self.from >= self.to {
            self.to = self.from + gap_ms.max(1);
        }
    }
}

/// Spawn windows for every prompt category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWindows {
    pub falling: SpawnWindow,
    pub bonus_drift: SpawnWindow,
    pub bonus_falling: SpawnWindow,
}

impl SpawnWindows {
    pub fn get(&self, kind: PromptKind) -> &SpawnWindow {
        match kind {
            PromptKind::Falling => &self.falling,
            PromptKind::BonusDrift => &self.bonus_drift,
            PromptKind::BonusFalling => &self.bonus_falling,
        }
    }

    pub fn scale(&mut self, gap_ms: u32) {
        self.falling.scale(gap_ms);
        self.bonus_drift.scale(gap_ms);
        self.bonus_falling.scale(gap_ms);
    }
}
