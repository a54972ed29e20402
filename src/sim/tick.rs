//! Timer dispatch and motion for one host tick
//!
//! Within a tick due timers fire in due order. Between them, and after the
//! last one, prompts and projectiles move and escapes are checked. Overlaps
//! are resolved afterwards, either by the host or by [`Session::step`].

use super::schedule::TimerAction;
use super::session::Session;
use super::state::{GamePhase, GameState};
use crate::error::GameError;
use crate::tuning::Tuning;

impl Session {
    /// Advance the session by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: u32) -> Result<(), GameError> {
        // Nothing moves before the first level or after the ground is gone
        match self.state.phase {
            GamePhase::Setup | GamePhase::GameOver => return Ok(()),
            _ => {}
        }

        // Motion is split at every timer due in this window, so a prompt
        // spawned partway through only moves for the time left after it
        let until = self.state.timers.now_ms() + dt_ms as u64;
        loop {
            let due = self.state.timers.next_due().filter(|&due| due <= until);
            let slice_end = due.unwrap_or(until);
            let slice_ms = slice_end.saturating_sub(self.state.timers.now_ms());
            self.state.timers.advance_to(slice_end);
            if self.state.phase == GamePhase::Running && slice_ms > 0 {
                self.advance_world(slice_ms);
            }

            if due.is_none() {
                break;
            }
            if let Some(timer) = self.state.timers.pop_due_by(slice_end) {
                self.fire(timer.action)?;
                if self.state.phase == GamePhase::GameOver {
                    return Ok(());
                }
            }
        }

        if self.state.phase == GamePhase::Running {
            self.state.normalize_order();
        }
        Ok(())
    }

    /// Move everything for one slice without timers, then reveal escapes
    fn advance_world(&mut self, slice_ms: u64) {
        advance_motion(&mut self.state, &self.tuning, slice_ms as f32 / 1000.0);
        self.drop_orphan_projectiles();
        self.resolve_escapes();
    }

    fn fire(&mut self, action: TimerAction) -> Result<(), GameError> {
        match action {
            TimerAction::Spawn { kind, rearm } => {
                if self.state.phase == GamePhase::Running {
                    self.spawn_prompt(kind, rearm)?;
                }
            }
            TimerAction::RemovePrompt(id) => self.remove_prompt(id),
            TimerAction::Countdown { remaining } => self.countdown(remaining)?,
            TimerAction::LevelEnd => {
                self.next_level()?;
            }
        }
        Ok(())
    }
}

/// Move active prompts along their velocity and home projectiles on targets
///
/// Resolving prompts stay frozen where they were revealed.
pub fn advance_motion(state: &mut GameState, tuning: &Tuning, dt: f32) {
    for prompt in state.prompts.iter_mut().filter(|p| p.is_active()) {
        prompt.pos += prompt.vel * dt;
    }

    let step = tuning.projectile_speed * dt;
    for shot in state.projectiles.iter_mut() {
        let Some(target) = state.prompts.iter().find(|p| p.id == shot.target) else {
            continue;
        };
        let to_target = target.center() - shot.pos;
        if to_target.length() <= step {
            shot.pos = target.center();
        } else {
            shot.pos += to_target.normalize_or_zero() * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{HookError, SessionHooks, SpeechOutput};
    use crate::sim::collision::Overlap;
    use crate::sim::prompt::{PromptKind, PromptState, hit_score};
    use crate::sim::state::GameEvent;
    use crate::error::GameError;
    use crate::hooks::NoopHooks;
    use crate::tuning::{DelayRange, InputMode, Tuning};
    use crate::vocab::{JsonVocabulary, VocabEntry, Vocabulary};
    use std::cell::RefCell;
    use std::rc::Rc;

    const ONE_WORD: &str = r#"{ "gehen": { "ich": "gehe", "english": "to go" } }"#;
    const TWO_WORDS: &str = r#"{
        "gehen": { "ich": "gehe", "english": "to go" },
        "sein": { "wir": "sind", "english": "to be" }
    }"#;
    const FRAME: u32 = 16;

    #[derive(Default)]
    struct Record {
        game_overs: Vec<u64>,
        selected: Vec<String>,
        removed: Vec<String>,
        cleared: usize,
        spoken: Vec<String>,
    }

    /// Hooks that write into a shared record, optionally failing
    struct Recorder {
        record: Rc<RefCell<Record>>,
        fail: bool,
    }

    impl SessionHooks for Recorder {
        fn on_game_over(&mut self, score: u64) {
            self.record.borrow_mut().game_overs.push(score);
        }

        fn on_text_selected(&mut self, answer: &str) -> Result<(), HookError> {
            self.record.borrow_mut().selected.push(answer.to_string());
            Ok(())
        }

        fn on_text_removed(&mut self, answer: &str) -> Result<(), HookError> {
            self.record.borrow_mut().removed.push(answer.to_string());
            if self.fail {
                return Err(HookError("input widget gone".into()));
            }
            Ok(())
        }

        fn on_selection_cleared(&mut self) -> Result<(), HookError> {
            self.record.borrow_mut().cleared += 1;
            Ok(())
        }
    }

    struct Voice(Rc<RefCell<Record>>);

    impl SpeechOutput for Voice {
        fn speak(&mut self, text: &str) {
            self.0.borrow_mut().spoken.push(text.to_string());
        }
    }

    /// Backend that lists words but cannot conjugate any of them
    struct Offline;

    impl Vocabulary for Offline {
        fn verbs(&self) -> Vec<&str> {
            vec!["gehen"]
        }

        fn subjects(&self, _verb: &str) -> Vec<&str> {
            vec!["ich"]
        }

        fn lookup(&self, verb: &str, subject: &str) -> Result<VocabEntry, GameError> {
            Err(GameError::UnknownSubject {
                verb: verb.to_string(),
                subject: subject.to_string(),
            })
        }

        // Trusts the backend up front, so failures only show at spawn time
        fn validate(&self) -> Result<(), GameError> {
            Ok(())
        }
    }

    fn session_with(vocab: &str, tuning: Tuning, fail: bool) -> (Session, Rc<RefCell<Record>>) {
        let record = Rc::new(RefCell::new(Record::default()));
        let hooks = Recorder {
            record: record.clone(),
            fail,
        };
        let vocab = JsonVocabulary::from_json(vocab).unwrap();
        let session = Session::new(12345, tuning, Box::new(vocab), Box::new(hooks))
            .unwrap()
            .with_speech(Box::new(Voice(record.clone())));
        (session, record)
    }

    /// Start level 1 and run through the countdown
    fn running(vocab: &str, tuning: Tuning) -> (Session, Rc<RefCell<Record>>) {
        let (mut session, record) = session_with(vocab, tuning, false);
        assert!(session.start_level().unwrap());
        session.tick(6000).unwrap();
        assert_eq!(session.phase(), GamePhase::Running);
        (session, record)
    }

    fn first_prompt(session: &Session) -> u32 {
        session.state.prompts[0].id
    }

    fn projectile_for(session: &Session, prompt: u32) -> u32 {
        session
            .state
            .projectiles
            .iter()
            .find(|p| p.target == prompt)
            .map(|p| p.id)
            .unwrap()
    }

    #[test]
    fn test_countdown_then_running() {
        let (mut session, _) = session_with(ONE_WORD, Tuning::default(), false);
        // Ticking before start does nothing
        session.tick(10_000).unwrap();
        assert_eq!(session.phase(), GamePhase::Setup);

        session.start_level().unwrap();
        assert_eq!(session.phase(), GamePhase::Countdown);
        session.tick(5999).unwrap();
        assert_eq!(session.phase(), GamePhase::Countdown);
        assert!(session.state.prompts.is_empty());
        session.tick(1).unwrap();
        assert_eq!(session.phase(), GamePhase::Running);

        let ticks: Vec<u32> = session
            .drain_events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::CountdownTick { remaining, .. } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(ticks, vec![5, 4, 3, 2, 1]);

        // One falling prompt right away, three armed spawn timers and the level timer
        assert_eq!(session.state.prompts.len(), 1);
        assert_eq!(session.state.prompts[0].kind, PromptKind::Falling);
        assert_eq!(session.state.timers.pending(), 4);
        assert_eq!(session.state.level_time_remaining_ms(), 90_000);
        assert!(!session.start_level().unwrap());
    }

    #[test]
    fn test_vocabulary_failure_prevents_level_start() {
        let mut tuning = Tuning::default();
        tuning.countdown_ticks = 0;
        let mut session = Session::new(1, tuning, Box::new(Offline), Box::new(NoopHooks)).unwrap();

        assert!(session.start_level().is_err());
        assert_eq!(session.phase(), GamePhase::Setup);
        assert!(session.state.prompts.is_empty());
        assert_eq!(session.state.timers.pending(), 0);
        assert_eq!(session.state.level_time_remaining_ms(), 0);
        assert!(
            !session
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelRunning { .. }))
        );

        // Same when the failure surfaces at the end of the countdown
        let mut session =
            Session::new(1, Tuning::default(), Box::new(Offline), Box::new(NoopHooks)).unwrap();
        assert!(session.start_level().unwrap());
        assert!(session.tick(6000).is_err());
        assert_eq!(session.phase(), GamePhase::Setup);
        assert_eq!(session.state.timers.pending(), 0);
        session.tick(10_000).unwrap();
        assert!(session.state.prompts.is_empty());
    }

    #[test]
    fn test_large_tick_matches_small_ticks() {
        let mut tuning = Tuning::default();
        tuning.falling_window = DelayRange::new(2000, 3000);
        let (mut big, _) = running(TWO_WORDS, tuning.clone());
        let (mut small, _) = running(TWO_WORDS, tuning);

        big.tick(10_000).unwrap();
        for _ in 0..625 {
            small.tick(FRAME).unwrap();
        }
        assert_eq!(big.state.timers.now_ms(), small.state.timers.now_ms());
        assert!(big.state.prompts.len() >= 3, "expected spawns inside the window");
        assert_eq!(big.state.prompts.len(), small.state.prompts.len());

        for (a, b) in big.state.prompts.iter().zip(&small.state.prompts) {
            assert_eq!(a.id, b.id);
            assert!(
                a.pos.distance(b.pos) < 0.05,
                "prompt #{} at {:?} vs {:?}",
                a.id,
                a.pos,
                b.pos
            );
        }
    }

    #[test]
    fn test_empty_answer_changes_nothing() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        session.drain_events();
        assert!(!session.attempt_answer(""));
        assert!(session.state.projectiles.is_empty());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_wrong_answer_is_a_miss() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        session.drain_events();
        assert!(!session.attempt_answer("gehst"));
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Miss {
                text: "gehst".into()
            }]
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_answer_before_running_is_ignored() {
        let (mut session, _) = session_with(ONE_WORD, Tuning::default(), false);
        assert!(!session.attempt_answer("gehe"));
    }

    #[test]
    fn test_hit_awards_level_scaled_score() {
        let (mut session, record) = running(ONE_WORD, Tuning::default());
        session.state.level = 3;
        let prompt = first_prompt(&session);
        let base = session.state.prompts[0].base_score;
        assert_eq!(base, 8);

        assert!(session.attempt_answer("GeHe"));
        assert_eq!(record.borrow().spoken, vec!["gehe".to_string()]);
        let shot = projectile_for(&session, prompt);
        assert!(session.on_projectile_hit(shot, prompt).unwrap());

        assert_eq!(session.score(), base + (base * 3 + 5) / 10);
        assert_eq!(session.score(), hit_score(base, 3));
        assert_eq!(session.state.prompt(prompt).unwrap().state, PromptState::Resolving);
        assert!(session.state.projectiles.is_empty());
    }

    #[test]
    fn test_hit_on_last_prompt_forces_catch_up_spawn() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        let prompt = first_prompt(&session);
        let timers_before = session.state.timers.pending();

        session.attempt_answer("gehe");
        let shot = projectile_for(&session, prompt);
        session.on_projectile_hit(shot, prompt).unwrap();

        assert_eq!(session.state.active_prompt_count(), 1);
        assert_eq!(session.state.prompts.len(), 2);
        // Only the removal timer was added: the catch-up spawn does not re-arm
        assert_eq!(session.state.timers.pending(), timers_before + 1);
    }

    #[test]
    fn test_no_catch_up_spawn_while_board_is_busy() {
        let (mut session, _) = running(TWO_WORDS, Tuning::default());
        session.spawn_prompt(PromptKind::Falling, false).unwrap();
        session.spawn_prompt(PromptKind::Falling, false).unwrap();
        let prompt = first_prompt(&session);
        let answer = session.state.prompts[0].answer.clone();
        let timers_before = session.state.timers.pending();

        session.attempt_answer(&answer);
        let shot = projectile_for(&session, prompt);
        assert!(session.on_projectile_hit(shot, prompt).unwrap());

        assert_eq!(session.state.active_prompt_count(), 2);
        assert_eq!(session.state.prompts.len(), 3);
        assert_eq!(session.state.timers.pending(), timers_before + 1);
    }

    #[test]
    fn test_bonus_hit_scores_tenfold_with_level() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        session.state.level = 2;
        let bonus = session.spawn_prompt(PromptKind::BonusFalling, false).unwrap();
        assert_eq!(session.state.prompt(bonus).unwrap().base_score, 40);
        session.drain_events();

        // The falling prompt is older, so the second shot goes to the bonus
        session.attempt_answer("gehe");
        session.attempt_answer("gehe");
        let shot = projectile_for(&session, bonus);
        assert!(session.on_projectile_hit(shot, bonus).unwrap());

        assert_eq!(session.score(), 48);
        let hits: Vec<GameEvent> = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PromptHit { .. }))
            .collect();
        assert_eq!(
            hits,
            vec![GameEvent::PromptHit {
                id: bonus,
                answer: "gehe".into(),
                points: 48,
                bonus: true,
            }]
        );
    }

    #[test]
    fn test_drifting_prompt_escapes_past_far_edge() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        let drift = session.spawn_prompt(PromptKind::BonusDrift, false).unwrap();
        let heading_left = session.state.prompt(drift).unwrap().vel.x < 0.0;

        session.tick(FRAME).unwrap();
        let entering = session.state.prompt(drift).unwrap();
        assert!(entering.is_active());
        assert!(entering.in_bounds);

        let mut ticks = 0;
        while session.state.prompt(drift).is_some_and(|p| p.is_active()) && ticks < 400 {
            session.tick(100).unwrap();
            ticks += 1;
        }

        let field = session.state.playfield;
        let escaped = session.state.prompt(drift).unwrap();
        assert_eq!(escaped.state, PromptState::Resolving);
        assert!(!escaped.in_bounds);
        if heading_left {
            assert!(escaped.pos.x + escaped.size.x <= field.left);
        } else {
            assert!(escaped.pos.x >= field.right);
        }
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::PromptEscaped { id: drift })
        );
    }

    #[test]
    fn test_host_handle_binding() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        let prompt = first_prompt(&session);
        assert!(session.bind_handle(prompt, 77));
        assert_eq!(session.state.prompt(prompt).unwrap().handle, Some(77));
        assert!(!session.bind_handle(999, 1));
    }

    #[test]
    fn test_stale_hits_are_no_ops() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        let prompt = first_prompt(&session);

        assert!(!session.on_projectile_hit(999, prompt).unwrap());
        assert!(!session.on_prompt_reaches_block(999, session.state.blocks[0].id));
        assert!(!session.on_prompt_reaches_block(prompt, 999));

        // Two shots at one prompt: only the first scores
        session.attempt_answer("gehe");
        session.attempt_answer("gehe");
        let shots: Vec<u32> = session.state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(shots.len(), 2);
        assert!(session.on_projectile_hit(shots[0], prompt).unwrap());
        let score = session.score();
        assert!(!session.on_projectile_hit(shots[1], prompt).unwrap());
        assert_eq!(session.score(), score);
        assert!(session.state.projectiles.is_empty());
    }

    #[test]
    fn test_duplicate_answers_target_earliest_untargeted() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        session.spawn_prompt(PromptKind::Falling, false).unwrap();
        let ids: Vec<u32> = session.state.prompts.iter().map(|p| p.id).collect();

        session.attempt_answer("gehe");
        session.attempt_answer("gehe");
        let targets: Vec<u32> = session.state.projectiles.iter().map(|p| p.target).collect();
        assert_eq!(targets, ids);
    }

    #[test]
    fn test_block_smash_reveals_prompt() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        let prompt = first_prompt(&session);
        let block = session.state.blocks[0].id;

        assert!(session.on_prompt_reaches_block(prompt, block));
        assert_eq!(session.state.remaining_blocks(), 59);
        let smashed = session.state.blocks.iter().find(|b| b.id == block).unwrap();
        assert!(!smashed.alive);
        assert_eq!(session.state.blocks.len(), 60);
        assert_eq!(session.state.surviving_columns().len(), 59);
        assert_eq!(session.state.prompt(prompt).unwrap().state, PromptState::Resolving);
        assert_eq!(session.phase(), GamePhase::Running);
        // Block is gone, a second report is stale
        assert!(!session.on_prompt_reaches_block(prompt, block));
    }

    #[test]
    fn test_last_block_ends_game_once() {
        let mut tuning = Tuning::default();
        tuning.starting_blocks = 1;
        let (mut session, record) = running(ONE_WORD, tuning);
        session.state.score = 42;
        let prompt = first_prompt(&session);
        let block = session.state.blocks[0].id;
        session.drain_events();

        assert!(session.on_prompt_reaches_block(prompt, block));
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(record.borrow().game_overs, vec![42]);
        assert_eq!(session.state.timers.pending(), 0);
        assert!(session.state.prompts.is_empty());

        let game_overs = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        // Nothing fires afterwards
        for _ in 0..100 {
            session.step(1000).unwrap();
        }
        assert!(session.drain_events().is_empty());
        assert_eq!(record.borrow().game_overs.len(), 1);
        assert_eq!(session.score(), 42);
        assert!(!session.attempt_answer("gehe"));
    }

    #[test]
    fn test_next_level_scales_difficulty_and_clears_board() {
        let (mut session, record) = running(ONE_WORD, Tuning::default());
        session.attempt_answer("gehe");
        let windows = session.state.windows;
        let cleared = record.borrow().cleared;

        assert!(session.next_level().unwrap());
        assert_eq!(session.level(), 2);
        assert_eq!(session.phase(), GamePhase::Countdown);
        assert_eq!(session.state.falling_speed, 14.0);
        assert_eq!(session.state.bonus_falling_speed, 40.0);
        assert_eq!(session.state.windows.falling.from, 5400);
        assert_eq!(session.state.windows.falling.to, 16200);
        assert_eq!(session.state.windows.bonus_drift.from, 9500);
        assert_eq!(session.state.windows.bonus_drift.to, 19000);
        assert!(session.state.windows.falling.to < windows.falling.to);
        assert!(session.state.prompts.is_empty());
        assert!(session.state.projectiles.is_empty());
        assert_eq!(record.borrow().cleared, cleared + 1);
        // Only the countdown is pending
        assert_eq!(session.state.timers.pending(), 1);

        // Not running any more, so a second call is ignored
        assert!(!session.next_level().unwrap());
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn test_level_timer_expiry_advances_level() {
        let mut tuning = Tuning::default();
        tuning.level_time_seconds = 2;
        let (mut session, _) = running(ONE_WORD, tuning);
        session.tick(1999).unwrap();
        assert_eq!(session.level(), 1);
        session.tick(1).unwrap();
        assert_eq!(session.level(), 2);
        assert_eq!(session.phase(), GamePhase::Countdown);
    }

    #[test]
    fn test_windows_stay_ordered_over_many_levels() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        for _ in 0..40 {
            session.next_level().unwrap();
            session.tick(6000).unwrap();
            let w = session.state.windows;
            assert!(w.falling.to > w.falling.from);
            assert!(w.bonus_drift.to > w.bonus_drift.from);
            assert!(w.bonus_falling.to > w.bonus_falling.from);
        }
        assert_eq!(session.level(), 41);
    }

    #[test]
    fn test_escaped_prompt_is_revealed_then_removed() {
        let (mut session, record) = running(ONE_WORD, Tuning::default());
        let prompt = first_prompt(&session);
        let bottom = session.state.playfield.bottom;
        // Drop it past the ground line in a column with no blocks under it
        session.state.blocks.clear();
        session.state.prompt_mut(prompt).unwrap().pos.y = bottom;

        session.tick(FRAME).unwrap();
        let revealed = session.state.prompt(prompt).unwrap();
        assert_eq!(revealed.state, PromptState::Resolving);
        assert!(!revealed.in_bounds);
        assert_eq!(revealed.display_text(), "gehe (to go)");

        session.tick(700).unwrap();
        assert!(session.state.prompt(prompt).is_none());
        assert_eq!(record.borrow().removed, vec!["gehe".to_string()]);
    }

    #[test]
    fn test_failing_removal_hook_does_not_block_removal() {
        let (mut session, record) = session_with(ONE_WORD, Tuning::default(), true);
        session.start_level().unwrap();
        session.tick(6000).unwrap();
        let prompt = first_prompt(&session);
        session.attempt_answer("gehe");
        let shot = projectile_for(&session, prompt);
        session.on_projectile_hit(shot, prompt).unwrap();

        session.tick(700).unwrap();
        assert!(session.state.prompt(prompt).is_none());
        assert_eq!(record.borrow().removed.len(), 1);
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_selection_only_with_touch() {
        let (mut session, record) = running(TWO_WORDS, Tuning::default());
        let prompt = first_prompt(&session);
        assert!(!session.select_prompt(prompt));

        let (mut session, record_touch) = running(TWO_WORDS, Tuning::for_input(InputMode::Touch));
        let prompt = first_prompt(&session);
        let answer = session.state.prompts[0].answer.clone();
        assert!(session.select_prompt(prompt));
        assert!(session.state.prompts[0].selected);
        assert_eq!(record_touch.borrow().selected, vec![answer]);
        assert!(!session.select_prompt(999));
        assert!(record.borrow().selected.is_empty());
    }

    #[test]
    fn test_apply_host_overlaps() {
        let (mut session, _) = running(ONE_WORD, Tuning::default());
        let prompt = first_prompt(&session);
        session.attempt_answer("gehe");
        let shot = projectile_for(&session, prompt);

        session
            .apply_overlaps(&[
                Overlap::ProjectileHit {
                    projectile: shot,
                    prompt,
                },
                // Same shot reported twice in one pass
                Overlap::ProjectileHit {
                    projectile: shot,
                    prompt,
                },
            ])
            .unwrap();
        assert_eq!(session.score(), hit_score(8, 1));
    }

    #[test]
    fn test_end_to_end_shot_scores_and_removes() {
        let mut tuning = Tuning::default();
        tuning.starting_blocks = 60;
        let (mut session, _) = running(ONE_WORD, tuning);
        let prompt = first_prompt(&session);

        assert!(session.attempt_answer("GEHE"));
        let mut frames = 0;
        while session.score() == 0 && frames < 500 {
            session.step(FRAME).unwrap();
            frames += 1;
        }
        assert!(session.score() > 0, "shot never landed");
        assert_eq!(session.state.prompt(prompt).unwrap().state, PromptState::Resolving);

        for _ in 0..50 {
            session.step(FRAME).unwrap();
        }
        assert!(session.state.prompt(prompt).is_none());
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let (mut session, _) = running(TWO_WORDS, Tuning::default());
            for i in 0..3000 {
                if i % 200 == 0 {
                    session.attempt_answer("gehe");
                    session.attempt_answer("sind");
                }
                session.step(FRAME).unwrap();
            }
            session
        };
        let a = run();
        let b = run();
        assert_eq!(a.score(), b.score());
        assert_eq!(a.level(), b.level());
        assert_eq!(a.state.remaining_blocks(), b.state.remaining_blocks());
        let ids = |s: &Session| s.state.prompts.iter().map(|p| (p.id, p.pos.x)).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }
}
