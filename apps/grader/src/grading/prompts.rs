//! Criterion prompt loading.
//!
//! Each prompt file is named `<code>_<description>.txt`; the code is the text
//! before the first underscore and becomes the `criterio` field in the report.

use std::path::Path;

use crate::errors::GraderError;
use crate::grading::files::{read_text, require_exists};
use crate::grading::models::CriterionPrompt;

/// Separator between criterion prompts when they are sent as one system turn.
const COMBINED_SEPARATOR: &str = "\n\n";

/// Loads the criterion prompts in the given order. Not cached.
pub fn load_prompts(dir: &Path, files: &[String]) -> Result<Vec<CriterionPrompt>, GraderError> {
    require_exists("diretório de prompts", dir)?;

    files
        .iter()
        .map(|file| {
            let code = criterion_code(file)?;
            let text = read_text(&dir.join(file))?;
            Ok(CriterionPrompt { code, text })
        })
        .collect()
}

/// Extracts the criterion code from a prompt filename.
pub fn criterion_code(file_name: &str) -> Result<String, GraderError> {
    match file_name.split_once('_') {
        Some((code, _)) if !code.is_empty() => Ok(code.to_string()),
        _ => Err(GraderError::InvalidPromptName(file_name.to_string())),
    }
}

/// All criterion prompts as a single system instruction, in order.
pub fn combined_system_prompt(prompts: &[CriterionPrompt]) -> String {
    prompts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(COMBINED_SEPARATOR)
}
