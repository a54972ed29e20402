//! Word Rain headless runner
//!
//! Plays a session with a simple bot so balance changes can be checked from
//! the terminal:
//!
//! ```text
//! RUST_LOG=info word-rain [verbs.json] [tuning.json]
//! ```

use anyhow::{Context, Result};

use word_rain::consts::FRAME_MS;
use word_rain::sim::PromptState;
use word_rain::{GameEvent, GamePhase, JsonVocabulary, Session, SessionHooks, Tuning};

const SAMPLE_VERBS: &str = include_str!("../data/verbs.json");
const DEFAULT_SEED: u64 = 0x5eed;
/// Stop after this level even if the bot survives
const MAX_LEVEL: u32 = 5;
/// Bot waits this long between answers
const BOT_DELAY_MS: u32 = 1500;
/// Every nth bot answer is deliberately wrong
const BOT_MISS_EVERY: u32 = 4;

struct LogHooks;

impl SessionHooks for LogHooks {
    fn on_game_over(&mut self, score: u64) {
        log::info!("Host notified of game over, final score {score}");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Word Rain (headless) starting...");

    let mut args = std::env::args().skip(1);
    let vocab = match args.next() {
        Some(path) => JsonVocabulary::from_file(&path)
            .with_context(|| format!("loading vocabulary from {path}"))?,
        None => JsonVocabulary::from_json(SAMPLE_VERBS)?,
    };
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning from {path}"))?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };
    let seed = std::env::var("WORD_RAIN_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut session = Session::new(seed, tuning, Box::new(vocab), Box::new(LogHooks))
        .context("setting up session")?;
    session.start_level()?;

    let mut since_answer = 0;
    let mut answers = 0;
    let mut elapsed_ms: u64 = 0;

    while session.phase() != GamePhase::GameOver && session.level() <= MAX_LEVEL {
        session.step(FRAME_MS)?;
        elapsed_ms += FRAME_MS as u64;
        since_answer += FRAME_MS;

        if session.phase() == GamePhase::Running && since_answer >= BOT_DELAY_MS {
            since_answer = 0;
            if let Some(answer) = bot_answer(&session, answers) {
                answers += 1;
                session.attempt_answer(&answer);
            }
        }

        for event in session.drain_events() {
            report(&event);
        }
    }

    println!(
        "Finished after {:.1}s: level {}, score {}, {} blocks left",
        elapsed_ms as f64 / 1000.0,
        session.level(),
        session.score(),
        session.state.remaining_blocks()
    );
    Ok(())
}

/// Answer the lowest active prompt, fumbling now and then
fn bot_answer(session: &Session, answers: u32) -> Option<String> {
    let lowest = session
        .state
        .prompts
        .iter()
        .filter(|p| p.state == PromptState::Active && p.in_bounds)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    if (answers + 1) % BOT_MISS_EVERY == 0 {
        Some(format!("{}x", lowest.answer))
    } else {
        Some(lowest.answer.to_uppercase())
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::LevelStarting { level, countdown } => {
            log::info!("Level {level} starts in {countdown}")
        }
        GameEvent::PromptHit {
            answer,
            points,
            bonus,
            ..
        } => log::info!("Hit '{answer}' for {points}{}", if *bonus { " (bonus)" } else { "" }),
        GameEvent::Miss { text } => log::info!("Missed with '{text}'"),
        GameEvent::BlockSmashed { remaining, .. } => {
            log::info!("Ground smashed, {remaining} blocks left")
        }
        GameEvent::LevelComplete { level, score } => {
            log::info!("Level {level} complete, score {score}")
        }
        GameEvent::GameOver { score } => log::info!("GAME OVER, score {score}"),
        other => log::debug!("{other:?}"),
    }
}
