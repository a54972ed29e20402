//! Session orchestration: level flow, difficulty and game over
//!
//! A [`Session`] owns the [`GameState`] plus the host capabilities the core
//! talks to. Level flow:
//!
//! ```text
//! Setup -> Countdown -> Running -> LevelComplete -> Countdown (level + 1) ...
//!                          \-> GameOver
//! ```

use super::collision::{Overlap, detect_overlaps};
use super::prompt::PromptKind;
use super::schedule::TimerAction;
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::GameError;
use crate::hooks::{self, NoopHooks, SessionHooks, SpeechOutput};
use crate::tuning::Tuning;
use crate::vocab::Vocabulary;

pub struct Session {
    pub state: GameState,
    pub(crate) tuning: Tuning,
    pub(crate) vocab: Box<dyn Vocabulary>,
    pub(crate) hooks: Box<dyn SessionHooks>,
    pub(crate) speech: Option<Box<dyn SpeechOutput>>,
}

impl Session {
    /// Build the ground and check the vocabulary can produce prompts
    pub fn new(
        seed: u64,
        tuning: Tuning,
        vocab: Box<dyn Vocabulary>,
        hooks: Box<dyn SessionHooks>,
    ) -> Result<Self, GameError> {
        tuning.validate()?;
        vocab.validate()?;

        let state = GameState::new(seed, &tuning);
        log::info!(
            "Session ready: seed={}, blocks={}, playfield={:?}",
            seed,
            state.blocks.len(),
            state.playfield
        );

        Ok(Self {
            state,
            tuning,
            vocab,
            hooks,
            speech: None,
        })
    }

    /// Session without host notifications
    pub fn headless(
        seed: u64,
        tuning: Tuning,
        vocab: Box<dyn Vocabulary>,
    ) -> Result<Self, GameError> {
        Self::new(seed, tuning, vocab, Box::new(NoopHooks))
    }

    pub fn with_speech(mut self, speech: Box<dyn SpeechOutput>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Attach the host's render/physics handle to a prompt
    ///
    /// Returns false if the prompt is already gone.
    pub fn bind_handle(&mut self, prompt: u32, handle: u64) -> bool {
        match self.state.prompt_mut(prompt) {
            Some(target) => {
                target.handle = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Begin the countdown for the current level
    ///
    /// Only valid from Setup or LevelComplete; returns false otherwise.
    pub fn start_level(&mut self) -> Result<bool, GameError> {
        if !matches!(self.state.phase, GamePhase::Setup | GamePhase::LevelComplete) {
            return Ok(false);
        }

        let level = self.state.level;
        let ticks = self.tuning.countdown_ticks;
        self.state.phase = GamePhase::Countdown;
        self.state.push_event(GameEvent::LevelStarting {
            level,
            countdown: ticks,
        });
        log::info!("Starting level {level} in {ticks}");

        if ticks == 0 {
            self.begin_running()?;
        } else {
            self.state.timers.arm(
                self.tuning.countdown_interval_ms,
                TimerAction::Countdown {
                    remaining: ticks - 1,
                },
            );
        }
        Ok(true)
    }

    pub(crate) fn countdown(&mut self, remaining: u32) -> Result<(), GameError> {
        if self.state.phase != GamePhase::Countdown {
            return Ok(());
        }
        if remaining == 0 {
            return self.begin_running();
        }
        self.state.push_event(GameEvent::CountdownTick {
            level: self.state.level,
            remaining,
        });
        self.state.timers.arm(
            self.tuning.countdown_interval_ms,
            TimerAction::Countdown {
                remaining: remaining - 1,
            },
        );
        Ok(())
    }

    fn begin_running(&mut self) -> Result<(), GameError> {
        let level = self.state.level;
        // Draw the first prompt before committing to the level
        let first = match self.prepare_prompt(PromptKind::Falling) {
            Ok(prompt) => prompt,
            Err(err) => {
                self.abort_level_start();
                return Err(err);
            }
        };

        self.state.phase = GamePhase::Running;
        let level_ms = self.tuning.level_time_seconds.saturating_mul(1000);
        self.state.level_timer = Some(self.state.timers.arm(level_ms, TimerAction::LevelEnd));
        self.state.push_event(GameEvent::LevelRunning { level });
        hooks::report(self.hooks.on_selection_cleared(), "clearing selection");
        log::info!("Level {level} running");

        self.insert_prompt(first, true);
        let drift_delay = self.state.rng.between(
            self.tuning.first_drift_delay.from,
            self.tuning.first_drift_delay.to,
        );
        self.state.timers.arm(
            drift_delay,
            TimerAction::Spawn {
                kind: PromptKind::BonusDrift,
                rearm: true,
            },
        );
        let bonus_delay = self.state.rng.between(
            self.tuning.first_bonus_falling_delay.from,
            self.tuning.first_bonus_falling_delay.to,
        );
        self.state.timers.arm(
            bonus_delay,
            TimerAction::Spawn {
                kind: PromptKind::BonusFalling,
                rearm: true,
            },
        );
        Ok(())
    }

    /// Back out of a level start the vocabulary could not supply
    ///
    /// The session returns to where `start_level` was called from, so the
    /// host can report the failure or retry.
    fn abort_level_start(&mut self) {
        self.state.timers.cancel_all();
        self.state.level_timer = None;
        self.state.phase = if self.state.level > 1 {
            GamePhase::LevelComplete
        } else {
            GamePhase::Setup
        };
        log::error!("Level {} could not start", self.state.level);
    }

    /// Finish the running level and count down into the next, harder one
    ///
    /// The built-in level timer calls this when it runs out; a host running
    /// its own level clock may call it instead. Ignored (false) unless a
    /// level is running.
    pub fn next_level(&mut self) -> Result<bool, GameError> {
        if self.state.phase != GamePhase::Running {
            return Ok(false);
        }

        self.end_level();
        let finished = self.state.level;
        self.state.phase = GamePhase::LevelComplete;
        self.state.push_event(GameEvent::LevelComplete {
            level: finished,
            score: self.state.score,
        });

        let step = self.tuning.falling_speed_per_level;
        self.state.level += 1;
        self.state.falling_speed += step;
        self.state.bonus_falling_speed += step;
        self.state.windows.scale(self.tuning.inverted_window_gap_ms);
        log::info!(
            "Level {} complete (score {}), next falling speed {}, windows {:?}",
            finished,
            self.state.score,
            self.state.falling_speed,
            self.state.windows
        );

        self.start_level()?;
        Ok(true)
    }

    /// Cancel every pending timer and clear the board
    fn end_level(&mut self) {
        let cancelled = self.state.timers.cancel_all();
        self.state.level_timer = None;
        log::debug!(
            "Ending level {}: cancelled {} timers, clearing {} prompts",
            self.state.level,
            cancelled,
            self.state.prompts.len()
        );
        self.state.prompts.clear();
        self.state.projectiles.clear();
        hooks::report(self.hooks.on_selection_cleared(), "clearing selection");
    }

    pub(crate) fn game_over(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        self.end_level();
        self.state.phase = GamePhase::GameOver;
        let score = self.state.score;
        self.state.push_event(GameEvent::GameOver { score });
        log::info!("Game over at level {} with score {}", self.state.level, score);
        self.hooks.on_game_over(score);
    }

    /// Advance time, then detect and resolve overlaps
    pub fn step(&mut self, dt_ms: u32) -> Result<(), GameError> {
        self.tick(dt_ms)?;
        let overlaps = detect_overlaps(&self.state, &self.tuning);
        self.apply_overlaps(&overlaps)
    }

    /// Resolve host-reported overlaps in order
    pub fn apply_overlaps(&mut self, overlaps: &[Overlap]) -> Result<(), GameError> {
        for overlap in overlaps {
            if self.state.phase != GamePhase::Running {
                break;
            }
            match *overlap {
                Overlap::ProjectileHit { projectile, prompt } => {
                    self.on_projectile_hit(projectile, prompt)?;
                }
                Overlap::PromptOnBlock { prompt, block } => {
                    self.on_prompt_reaches_block(prompt, block);
                }
            }
        }
        Ok(())
    }
}
