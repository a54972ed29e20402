//! Error types for session setup and vocabulary loading

use std::fmt;
use std::io;

/// Errors that can stop a session from being set up or continued
#[derive(Debug)]
pub enum GameError {
    /// Vocabulary has no verbs at all
    EmptyVocabulary,
    /// Verb exists but has no conjugated subjects
    NoSubjects(String),
    /// Verb has no English gloss
    MissingGloss(String),
    UnknownVerb(String),
    UnknownSubject { verb: String, subject: String },
    /// Tuning values that would break generation or scheduling
    InvalidTuning(String),
    Parse(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyVocabulary => write!(f, "vocabulary contains no verbs"),
            GameError::NoSubjects(verb) => write!(f, "verb '{verb}' has no subjects"),
            GameError::MissingGloss(verb) => write!(f, "verb '{verb}' has no english gloss"),
            GameError::UnknownVerb(verb) => write!(f, "unknown verb '{verb}'"),
            GameError::UnknownSubject { verb, subject } => {
                write!(f, "verb '{verb}' has no form for subject '{subject}'")
            }
            GameError::InvalidTuning(reason) => write!(f, "invalid tuning: {reason}"),
            GameError::Parse(err) => write!(f, "parse error: {err}"),
            GameError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Parse(err) => Some(err),
            GameError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Parse(err)
    }
}
