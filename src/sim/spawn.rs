//! Prompt spawning and spawn timers

use super::prompt::{Prompt, PromptKind, place_drift, place_falling};
use super::schedule::TimerAction;
use super::session::Session;
use super::state::GameEvent;
use crate::error::GameError;
use crate::vocab::VocabEntry;

impl Session {
    /// Arm the next spawn of `kind` from its current window
    pub fn schedule_next(&mut self, kind: PromptKind) -> u32 {
        let delay = self.state.windows.get(kind).draw(&mut self.state.rng);
        log::debug!("Next {kind:?} in {delay}ms");
        self.state
            .timers
            .arm(delay, TimerAction::Spawn { kind, rearm: true })
    }

    /// Create a prompt of `kind` and place it on the playfield
    ///
    /// With `rearm`, the next spawn of the same kind is scheduled too.
    pub(crate) fn spawn_prompt(&mut self, kind: PromptKind, rearm: bool) -> Result<u32, GameError> {
        let prompt = self.prepare_prompt(kind)?;
        Ok(self.insert_prompt(prompt, rearm))
    }

    /// Draw and place a prompt without adding it to play
    ///
    /// A vocabulary failure leaves the board and timers untouched.
    pub(crate) fn prepare_prompt(&mut self, kind: PromptKind) -> Result<Prompt, GameError> {
        let entry = self.draw_entry()?;
        let id = self.state.next_entity_id();
        let mut prompt = Prompt::new(id, kind, entry, &self.tuning);

        let playfield = self.state.playfield;
        if kind.falls() {
            let columns = self.state.surviving_columns();
            prompt.pos = place_falling(
                &mut self.state.rng,
                prompt.size.x,
                &playfield,
                &self.tuning,
                &columns,
            );
            prompt.vel.y = self.state.speed_for(kind);
        } else {
            let (pos, vel) = place_drift(&mut self.state.rng, &playfield, &self.tuning);
            prompt.pos = pos;
            prompt.vel = vel;
        }
        Ok(prompt)
    }

    pub(crate) fn insert_prompt(&mut self, prompt: Prompt, rearm: bool) -> u32 {
        let (id, kind) = (prompt.id, prompt.kind);
        log::debug!(
            "Spawned {:?} #{} '{}' at ({:.0}, {:.0})",
            kind,
            id,
            prompt.answer,
            prompt.pos.x,
            prompt.pos.y
        );
        self.state.prompts.push(prompt);
        self.state.push_event(GameEvent::PromptSpawned { id, kind });

        if rearm {
            self.schedule_next(kind);
        }
        id
    }

    /// Random verb, then a random subject of it
    fn draw_entry(&mut self) -> Result<VocabEntry, GameError> {
        let verbs = self.vocab.verbs();
        let verb = self
            .state
            .rng
            .index(verbs.len())
            .map(|i| verbs[i])
            .ok_or(GameError::EmptyVocabulary)?;

        let subjects = self.vocab.subjects(verb);
        let subject = self
            .state
            .rng
            .index(subjects.len())
            .map(|i| subjects[i])
            .ok_or_else(|| GameError::NoSubjects(verb.to_string()))?;

        self.vocab.lookup(verb, subject)
    }
}
