//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a host can load a
//! different balance from JSON without recompiling.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Largest ground a session will generate
pub const MAX_STARTING_BLOCKS: usize = 100_000;

/// How the player enters answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    #[default]
    Keyboard,
    /// On-screen keys at both sides plus tap-to-select prompts
    Touch,
    Voice,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Keyboard => "Keyboard",
            InputMode::Touch => "Touch",
            InputMode::Voice => "Voice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" | "keys" => Some(InputMode::Keyboard),
            "touch" => Some(InputMode::Touch),
            "voice" | "speech" => Some(InputMode::Voice),
            _ => None,
        }
    }

    /// Whether prompts can be picked by pointer
    pub fn supports_selection(&self) -> bool {
        matches!(self, InputMode::Touch)
    }
}

/// A `[from, to]` millisecond range a random delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub from: u32,
    pub to: u32,
}

impl DelayRange {
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }
}

/// Game balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom of the screen to the ground line
    pub floor_offset: f32,
    /// Width of the on-screen key strips on each side (Touch only)
    pub side_input_width: f32,
    pub input_mode: InputMode,

    // === Ground ===
    pub block_size: f32,
    pub starting_blocks: usize,

    // === Levels ===
    pub level_time_seconds: u32,
    pub countdown_ticks: u32,
    pub countdown_interval_ms: u32,

    // === Speeds (px/s) ===
    pub start_falling_speed: f32,
    pub start_bonus_falling_speed: f32,
    pub falling_speed_per_level: f32,
    pub drift_speed: f32,
    pub projectile_speed: f32,

    // === Spawn timing ===
    pub falling_window: DelayRange,
    /// Fraction the falling window shrinks by each level
    pub falling_window_shrink: f32,
    pub bonus_window: DelayRange,
    pub bonus_window_shrink: f32,
    /// First delay for the drifting bonus after a level starts
    pub first_drift_delay: DelayRange,
    /// First delay for the falling bonus after a level starts
    pub first_bonus_falling_delay: DelayRange,
    /// Gap re-applied when scaling would make `from >= to`
    pub inverted_window_gap_ms: u32,

    // === Prompts ===
    /// How long a hit or escaped prompt shows its answer before removal
    pub reveal_delay_ms: u32,
    /// Chance (0-100) a falling prompt lines up over a surviving block
    pub column_reuse_percent: u32,
    pub falling_score_multiplier: u64,
    pub bonus_score_multiplier: u64,
    /// How far outside the side edge a drifting bonus appears
    pub drift_spawn_offset: f32,
    /// Vertical band (from top) for drifting bonus prompts
    pub drift_band_top: f32,
    pub drift_band_bottom: f32,
    pub glyph_width: f32,
    pub line_height: f32,
    /// Slack around the playfield before a drifting prompt counts as gone
    pub bounds_margin: f32,
    /// Falling prompts escape this far above the ground line
    pub ground_escape_slack: f32,
    pub projectile_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width: 1280.0,
            height: 700.0,
            floor_offset: 100.0,
            side_input_width: 0.0,
            input_mode: InputMode::Keyboard,

            block_size: 20.0,
            starting_blocks: 60,

            level_time_seconds: 90,
            countdown_ticks: 6,
            countdown_interval_ms: 1000,

            start_falling_speed: 12.0,
            start_bonus_falling_speed: 38.0,
            falling_speed_per_level: 2.0,
            drift_speed: 70.0,
            projectile_speed: 600.0,

            falling_window: DelayRange::new(6000, 18000),
            falling_window_shrink: 0.10,
            bonus_window: DelayRange::new(10000, 20000),
            bonus_window_shrink: 0.05,
            first_drift_delay: DelayRange::new(15000, 50000),
            first_bonus_falling_delay: DelayRange::new(1500, 50000),
            inverted_window_gap_ms: 1000,

            reveal_delay_ms: 700,
            column_reuse_percent: 80,
            falling_score_multiplier: 2,
            bonus_score_multiplier: 10,
            drift_spawn_offset: 100.0,
            drift_band_top: 50.0,
            drift_band_bottom: 400.0,
            glyph_width: 15.0,
            line_height: 34.0,
            bounds_margin: 120.0,
            ground_escape_slack: 5.0,
            projectile_size: 6.0,
        }
    }
}

impl Tuning {
    /// Tuning for a given input mode (Touch reserves side strips)
    pub fn for_input(mode: InputMode) -> Self {
        let mut tuning = Self::default();
        tuning.input_mode = mode;
        if mode == InputMode::Touch {
            tuning.side_input_width = 120.0;
        }
        tuning
    }

    /// Effective side strip width (only Touch input has one)
    pub fn effective_side_width(&self) -> f32 {
        if self.input_mode == InputMode::Touch {
            self.side_input_width
        } else {
            0.0
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make generation or scheduling meaningless
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: &str| Err(GameError::InvalidTuning(reason.to_string()));

        if self.block_size <= 0.0 {
            return invalid("block_size must be positive");
        }
        if self.starting_blocks > MAX_STARTING_BLOCKS {
            return Err(GameError::InvalidTuning(format!(
                "starting_blocks ({}) must not exceed {MAX_STARTING_BLOCKS}",
                self.starting_blocks
            )));
        }
        let play_width = self.width - self.effective_side_width() * 2.0;
        if play_width < self.block_size {
            return invalid("play width must fit at least one block");
        }
        if self.height - self.floor_offset <= self.origin_y {
            return invalid("floor_offset leaves no playfield");
        }
        if self.countdown_interval_ms == 0 {
            return invalid("countdown_interval_ms must be positive");
        }
        if self.column_reuse_percent > 100 {
            return invalid("column_reuse_percent must be 0-100");
        }
        if !(0.0..1.0).contains(&self.falling_window_shrink)
            || !(0.0..1.0).contains(&self.bonus_window_shrink)
        {
            return invalid("window shrink must be in [0, 1)");
        }
        if self.inverted_window_gap_ms == 0 {
            return invalid("inverted_window_gap_ms must be positive");
        }
        for (name, range) in [
            ("falling_window", self.falling_window),
            ("bonus_window", self.bonus_window),
            ("first_drift_delay", self.first_drift_delay),
            ("first_bonus_falling_delay", self.first_bonus_falling_delay),
        ] {
            if range.from >= range.to {
                return Err(GameError::InvalidTuning(format!(
                    "{name}: from ({}) must be below to ({})",
                    range.from, range.to
                )));
            }
        }
        if self.drift_band_top > self.drift_band_bottom {
            return invalid("drift band is inverted");
        }
        Ok(())
    }
}
