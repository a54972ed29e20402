//! Answer matching, hits and ground smashing
//!
//! Every handler here tolerates stale ids: the host's overlap reports and the
//! core's own removals can cross within one tick, so a missing prompt,
//! projectile or block is a no-op rather than an error.

use glam::Vec2;

use super::prompt::{PromptKind, hit_score};
use super::schedule::TimerAction;
use super::session::Session;
use super::state::{GameEvent, GamePhase, Projectile};
use crate::error::GameError;
use crate::hooks;

impl Session {
    /// Fire at the prompt whose answer matches `text` (case-insensitive)
    ///
    /// Among several matches the earliest-spawned prompt without a shot
    /// already on the way wins. Returns false for empty input, for a miss,
    /// and when no level is running.
    pub fn attempt_answer(&mut self, text: &str) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        let wanted = text.to_lowercase();
        if wanted.is_empty() {
            return false;
        }

        let targeted: Vec<u32> = self.state.projectiles.iter().map(|p| p.target).collect();
        let matching: Vec<(u32, bool)> = self
            .state
            .prompts
            .iter()
            .filter(|p| p.is_active() && p.matches(&wanted))
            .map(|p| (p.id, targeted.contains(&p.id)))
            .collect();
        let target = matching
            .iter()
            .find(|(_, already)| !already)
            .or(matching.first())
            .map(|(id, _)| *id);

        let Some(target) = target else {
            self.state.push_event(GameEvent::Miss {
                text: text.to_string(),
            });
            return false;
        };

        let Some(prompt) = self.state.prompt(target) else {
            return false;
        };
        let answer = prompt.answer.clone();
        let launch = Vec2::new(prompt.center().x, self.state.playfield.bottom);

        if let Some(speech) = self.speech.as_mut() {
            if !speech.is_speaking() {
                speech.speak(&answer);
            }
        }

        let id = self.state.next_entity_id();
        self.state.projectiles.push(Projectile {
            id,
            target,
            pos: launch,
        });
        self.state.push_event(GameEvent::Fired {
            projectile: id,
            prompt: target,
        });
        log::debug!("Fired #{id} at prompt #{target} ('{answer}')");
        true
    }

    /// A projectile reached its target
    ///
    /// Returns true if the hit scored. The projectile is always consumed.
    pub fn on_projectile_hit(&mut self, projectile: u32, prompt: u32) -> Result<bool, GameError> {
        let Some(index) = self.state.projectiles.iter().position(|p| p.id == projectile) else {
            return Ok(false);
        };
        self.state.projectiles.remove(index);

        if self.state.phase != GamePhase::Running {
            return Ok(false);
        }
        let level = self.state.level;
        let Some(target) = self.state.prompt_mut(prompt) else {
            return Ok(false);
        };
        if !target.is_active() {
            return Ok(false);
        }

        let points = hit_score(target.base_score, level);
        let answer = target.answer.clone();
        let bonus = target.kind.is_bonus();
        target.begin_resolving();

        self.state.score += points;
        self.arm_removal(prompt);
        self.state.push_event(GameEvent::PromptHit {
            id: prompt,
            answer,
            points,
            bonus,
        });

        // Keep the board from going empty between spawn timers
        if self.state.active_prompt_count() <= 1 {
            self.spawn_prompt(PromptKind::Falling, false)?;
        }
        Ok(true)
    }

    /// A falling prompt landed on a ground block
    ///
    /// Destroys the block and reveals the prompt. Ends the session when the
    /// last block goes. Returns true if a block was destroyed.
    pub fn on_prompt_reaches_block(&mut self, prompt: u32, block: u32) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        let prompt_active = self.state.prompt(prompt).is_some_and(|p| p.is_active());
        let block_alive = self
            .state
            .blocks
            .iter()
            .any(|b| b.id == block && b.alive);
        if !prompt_active || !block_alive {
            return false;
        }

        if let Some(smashed) = self.state.blocks.iter_mut().find(|b| b.id == block) {
            smashed.alive = false;
        }
        if let Some(target) = self.state.prompt_mut(prompt) {
            target.begin_resolving();
        }
        self.arm_removal(prompt);

        let remaining = self.state.remaining_blocks();
        self.state.push_event(GameEvent::BlockSmashed {
            block,
            prompt,
            remaining,
        });
        log::debug!("Prompt #{prompt} smashed block #{block}, {remaining} left");

        if remaining == 0 {
            self.game_over();
        }
        true
    }

    /// Pointer picked a prompt: sync the input line and highlight matches
    ///
    /// Only meaningful for input modes with pointer selection.
    pub fn select_prompt(&mut self, prompt: u32) -> bool {
        if !self.tuning.input_mode.supports_selection() {
            return false;
        }
        let Some(answer) = self
            .state
            .prompt(prompt)
            .filter(|p| p.is_active())
            .map(|p| p.answer.clone())
        else {
            return false;
        };

        hooks::report(self.hooks.on_text_selected(&answer), "selecting prompt");
        for p in self.state.prompts.iter_mut() {
            p.selected = p.is_active() && p.answer == answer;
        }
        true
    }

    /// Reveal prompts that left the playfield
    pub(crate) fn resolve_escapes(&mut self) {
        let playfield = self.state.playfield;
        let escaped: Vec<u32> = self
            .state
            .prompts
            .iter_mut()
            .filter(|p| p.is_active())
            .filter_map(|p| {
                p.in_bounds = !p.is_out_of_bounds(&playfield, &self.tuning);
                (!p.in_bounds).then_some(p.id)
            })
            .collect();

        for id in escaped {
            if let Some(prompt) = self.state.prompt_mut(id) {
                prompt.begin_resolving();
            }
            self.arm_removal(id);
            self.state.push_event(GameEvent::PromptEscaped { id });
        }
    }

    /// Projectiles whose target is gone or already resolving
    pub(crate) fn drop_orphan_projectiles(&mut self) {
        let prompts = &self.state.prompts;
        self.state.projectiles.retain(|shot| {
            prompts
                .iter()
                .any(|p| p.id == shot.target && p.is_active())
        });
    }

    fn arm_removal(&mut self, prompt: u32) {
        self.state
            .timers
            .arm(self.tuning.reveal_delay_ms, TimerAction::RemovePrompt(prompt));
    }

    /// Reveal delay over: take the prompt out of play
    pub(crate) fn remove_prompt(&mut self, id: u32) {
        let Some(index) = self.state.prompts.iter().position(|p| p.id == id) else {
            return;
        };
        let mut prompt = self.state.prompts.remove(index);
        prompt.mark_destroyed();
        self.state.projectiles.retain(|shot| shot.target != id);

        hooks::report(self.hooks.on_text_removed(&prompt.answer), "removing prompt");
        self.state.push_event(GameEvent::PromptRemoved {
            id,
            answer: prompt.answer,
        });
    }
}
