//! Word prompts: the falling and drifting quiz items
//!
//! A prompt shows a subject and a verb until it is answered or escapes, then
//! reveals the conjugated answer for a moment before it is removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use super::state::Playfield;
use crate::tuning::Tuning;
use crate::vocab::VocabEntry;

/// Prompt variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    /// Regular word falling onto the ground
    Falling,
    /// Bonus word crossing the screen sideways
    BonusDrift,
    /// Bonus word falling faster than regular ones
    BonusFalling,
}

impl PromptKind {
    pub fn is_bonus(&self) -> bool {
        !matches!(self, PromptKind::Falling)
    }

    /// Falling variants escape at the ground line instead of the frame edge
    pub fn falls(&self) -> bool {
        matches!(self, PromptKind::Falling | PromptKind::BonusFalling)
    }

    pub fn score_multiplier(&self, tuning: &Tuning) -> u64 {
        if self.is_bonus() {
            tuning.bonus_score_multiplier
        } else {
            tuning.falling_score_multiplier
        }
    }
}

/// Lifecycle: Active -> Resolving -> Destroyed, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptState {
    Active,
    /// Answer revealed, frozen, waiting for removal
    Resolving,
    Destroyed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: u32,
    pub kind: PromptKind,
    pub verb: String,
    pub subject: String,
    pub answer: String,
    pub english: String,
    /// Points before level scaling
    pub base_score: u64,
    /// Top-left corner
    pub pos: Vec2,
    /// px/s
    pub vel: Vec2,
    pub size: Vec2,
    pub in_bounds: bool,
    /// Highlighted by pointer selection
    pub selected: bool,
    pub state: PromptState,
    /// Opaque render/physics handle owned by the host
    #[serde(default)]
    pub handle: Option<u64>,
}

impl Prompt {
    pub fn new(id: u32, kind: PromptKind, entry: VocabEntry, tuning: &Tuning) -> Self {
        let base_score = base_score(&entry.answer, kind, tuning);
        let verb_line = format!("({})", entry.verb);
        let size = text_size(&[entry.subject.as_str(), verb_line.as_str()], tuning);
        Self {
            id,
            kind,
            verb: entry.verb,
            subject: entry.subject,
            answer: entry.answer,
            english: entry.english,
            base_score,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
            in_bounds: true,
            selected: false,
            state: PromptState::Active,
            handle: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == PromptState::Active
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Case-insensitive answer check against already lowercased input
    pub fn matches(&self, lowered: &str) -> bool {
        self.answer.to_lowercase() == lowered
    }

    /// Text the host should draw for this prompt right now
    pub fn display_text(&self) -> String {
        match self.state {
            PromptState::Active => format!("{}\n({})", self.subject, self.verb),
            _ => format!("{} ({})", self.answer, self.english),
        }
    }

    /// Reveal the answer and freeze. Returns false if not Active.
    pub fn begin_resolving(&mut self) -> bool {
        if self.state != PromptState::Active {
            return false;
        }
        self.state = PromptState::Resolving;
        self.vel = Vec2::ZERO;
        self.selected = false;
        true
    }

    /// Returns false unless the prompt was Resolving
    pub fn mark_destroyed(&mut self) -> bool {
        if self.state != PromptState::Resolving {
            return false;
        }
        self.state = PromptState::Destroyed;
        true
    }

    pub fn is_out_of_bounds(&self, playfield: &Playfield, tuning: &Tuning) -> bool {
        if self.kind.falls() {
            return self.pos.y >= playfield.bottom - self.size.y + tuning.ground_escape_slack;
        }
        let margin = tuning.bounds_margin;
        self.pos.x >= playfield.right + margin
            || self.pos.x + self.size.x <= playfield.left - margin
            || self.pos.y >= playfield.bottom + margin
            || self.pos.y + self.size.y <= playfield.top - margin
    }
}

/// Points for answering a prompt, before level scaling
pub fn base_score(answer: &str, kind: PromptKind, tuning: &Tuning) -> u64 {
    answer.chars().count() as u64 * kind.score_multiplier(tuning)
}

/// Points awarded for a hit at the given level: `base + round(base * level / 10)`
pub fn hit_score(base: u64, level: u32) -> u64 {
    base + (base * level as u64 + 5) / 10
}

/// Rough text extent from glyph metrics
pub fn text_size(lines: &[&str], tuning: &Tuning) -> Vec2 {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    Vec2::new(
        longest as f32 * tuning.glyph_width,
        lines.len() as f32 * tuning.line_height,
    )
}

/// Pick the top-left corner for a falling prompt
///
/// Usually lines up over a surviving ground block, otherwise a random
/// column. The result is pulled back so the prompt's right edge stays inside.
pub fn place_falling(
    rng: &mut GameRng,
    width: f32,
    playfield: &Playfield,
    tuning: &Tuning,
    surviving_xs: &[f32],
) -> Vec2 {
    let reuse = rng.percent(tuning.column_reuse_percent);
    let mut x = match rng.index(surviving_xs.len()) {
        Some(i) if reuse => surviving_xs[i],
        _ => {
            let columns = (playfield.width() / tuning.block_size).floor() as u32;
            rng.between(0, columns) as f32 * tuning.block_size + playfield.left
        }
    };

    if x + width > playfield.right {
        x = playfield.right - width;
    }
    Vec2::new(x.max(playfield.left), playfield.top)
}

/// Pick start corner and velocity for a drifting bonus prompt
pub fn place_drift(rng: &mut GameRng, playfield: &Playfield, tuning: &Tuning) -> (Vec2, Vec2) {
    let y = playfield.top
        + rng.between(tuning.drift_band_top as u32, tuning.drift_band_bottom as u32) as f32;

    if rng.between(0, 1) == 0 {
        // Enter from the right, head left
        let pos = Vec2::new(playfield.right + tuning.drift_spawn_offset, y);
        (pos, Vec2::new(-tuning.drift_speed, 0.0))
    } else {
        let pos = Vec2::new(playfield.left - tuning.drift_spawn_offset, y);
        (pos, Vec2::new(tuning.drift_speed, 0.0))
    }
}
