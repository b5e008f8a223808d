//! Rubric Store — maps (criterion code, score level) to the rubric's justification text.
//!
//! Lookup keys are the score truncated toward zero and rendered as an integer
//! string (`83.9 → "83"`). Non-matching scores get a placeholder description;
//! they are not snapped to the nearest rubric level.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::errors::GraderError;
use crate::grading::files::{read_text, require_exists};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RubricTable {
    levels: HashMap<String, HashMap<String, String>>,
}

impl RubricTable {
    /// Loads the rubric JSON. Missing file and malformed JSON are both fatal.
    pub fn load(path: &Path) -> Result<Self, GraderError> {
        require_exists("arquivo de rubrica", path)?;
        let raw = read_text(path)?;
        Self::from_json(&raw).map_err(|source| GraderError::RubricParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Rubric text for `score` under criterion `code`, or a placeholder naming
    /// the missing key.
    pub fn describe(&self, code: &str, score: f64) -> String {
        let key = rubric_key(score);
        self.levels
            .get(code)
            .and_then(|levels| levels.get(&key))
            .cloned()
            .unwrap_or_else(|| missing_description(&key, code))
    }
}

/// Integer-cast lookup key for a score.
pub fn rubric_key(score: f64) -> String {
    (score as i64).to_string()
}

fn missing_description(key: &str, code: &str) -> String {
    format!("Descrição não encontrada para a nota {key} no critério {code}")
}
