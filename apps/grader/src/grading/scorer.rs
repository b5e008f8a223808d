//! Scorer — one model call per (criterion, essay), reply coerced to a float.

use std::sync::Arc;

use tracing::debug;

use crate::errors::GraderError;
use crate::grading::models::CriterionPrompt;
use crate::grading::prompts::combined_system_prompt;
use crate::llm_client::ChatModel;

/// Wraps a `ChatModel` with the numeric reply contract.
#[derive(Clone)]
pub struct Scorer {
    model: Arc<dyn ChatModel>,
}

impl Scorer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Scores `essay` against one criterion. The essay is sent verbatim as the user turn.
    ///
    /// Returns `GraderError::NonNumericOutput` when the reply is not a number;
    /// any transport or provider failure comes back as `GraderError::Llm`.
    pub async fn score(&self, prompt: &CriterionPrompt, essay: &str) -> Result<f64, GraderError> {
        let reply = self.model.submit(&prompt.text, essay).await?;
        debug!(criterion = %prompt.code, reply = %reply.trim(), "model reply");
        parse_score(&reply)
    }

    /// Scores `essay` against all criteria at once, returning the model's overall grade.
    pub async fn score_combined(
        &self,
        prompts: &[CriterionPrompt],
        essay: &str,
    ) -> Result<f64, GraderError> {
        let system = combined_system_prompt(prompts);
        let reply = self.model.submit(&system, essay).await?;
        parse_score(&reply)
    }
}

/// Parses a model reply as a finite float after trimming surrounding whitespace.
pub fn parse_score(text: &str) -> Result<f64, GraderError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GraderError::NonNumericOutput(text.to_string())),
    }
}
