//! Vocabulary provider
//!
//! Maps a verb/subject pair to its conjugated answer and the verb's English
//! gloss. Hosts can plug in their own source through [`Vocabulary`];
//! [`JsonVocabulary`] reads the game's verb table format:
//!
//! ```json
//! { "gehen": { "ich": "gehe", "du": "gehst", "english": "to go" } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::GameError;

/// Key holding the English gloss inside each verb table
pub const GLOSS_KEY: &str = "english";

/// One quiz item resolved from the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub verb: String,
    pub subject: String,
    pub answer: String,
    pub english: String,
}

/// Source of verbs, subjects and conjugated answers
pub trait Vocabulary {
    /// All known verbs, in a stable order
    fn verbs(&self) -> Vec<&str>;

    /// Subjects a verb can be conjugated for, in a stable order
    fn subjects(&self, verb: &str) -> Vec<&str>;

    fn lookup(&self, verb: &str, subject: &str) -> Result<VocabEntry, GameError>;

    /// Check that every verb/subject pair a prompt can be drawn from resolves
    fn validate(&self) -> Result<(), GameError> {
        let verbs = self.verbs();
        if verbs.is_empty() {
            return Err(GameError::EmptyVocabulary);
        }
        for verb in verbs {
            let subjects = self.subjects(verb);
            if subjects.is_empty() {
                return Err(GameError::NoSubjects(verb.to_string()));
            }
            for subject in subjects {
                self.lookup(verb, subject)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct VerbTable {
    english: String,
    forms: BTreeMap<String, String>,
}

/// Vocabulary backed by the JSON verb table
#[derive(Debug, Clone, Default)]
pub struct JsonVocabulary {
    verbs: BTreeMap<String, VerbTable>,
}

impl JsonVocabulary {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;
        let mut verbs = BTreeMap::new();

        for (verb, mut forms) in raw {
            let english = forms
                .remove(GLOSS_KEY)
                .ok_or_else(|| GameError::MissingGloss(verb.clone()))?;
            if forms.is_empty() {
                return Err(GameError::NoSubjects(verb));
            }
            verbs.insert(verb, VerbTable { english, forms });
        }

        if verbs.is_empty() {
            return Err(GameError::EmptyVocabulary);
        }
        log::info!("Loaded vocabulary with {} verbs", verbs.len());
        Ok(Self { verbs })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

impl Vocabulary for JsonVocabulary {
    fn verbs(&self) -> Vec<&str> {
        self.verbs.keys().map(String::as_str).collect()
    }

    fn subjects(&self, verb: &str) -> Vec<&str> {
        self.verbs
            .get(verb)
            .map(|table| table.forms.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn lookup(&self, verb: &str, subject: &str) -> Result<VocabEntry, GameError> {
        let table = self
            .verbs
            .get(verb)
            .ok_or_else(|| GameError::UnknownVerb(verb.to_string()))?;
        let answer = table
            .forms
            .get(subject)
            .ok_or_else(|| GameError::UnknownSubject {
                verb: verb.to_string(),
                subject: subject.to_string(),
            })?;
        Ok(VocabEntry {
            verb: verb.to_string(),
            subject: subject.to_string(),
            answer: answer.clone(),
            english: table.english.clone(),
        })
    }
}
