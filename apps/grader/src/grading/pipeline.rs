//! Aggregator — drives essays × criteria, attaches rubric text, and flushes the report.
//!
//! Failure policy:
//! - missing inputs, bad prompt names and malformed rubric abort before anything is written;
//! - a non-numeric model reply scores `fallback_score` and the essay continues;
//! - any other failure inside an essay ends that essay with `erro` set, and the
//!   run moves on to the next one;
//! - the report is rewritten after every essay, so a crash keeps completed work.

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::GradingConfig;
use crate::errors::GraderError;
use crate::grading::essays::{discover_essays, EssaySource};
use crate::grading::files::{read_text, require_exists};
use crate::grading::models::{strip_extension, CriterionPrompt, CriterionScore, Essay, EssayEvaluation};
use crate::grading::prompts::load_prompts;
use crate::grading::report::write_report;
use crate::grading::rubric::RubricTable;
use crate::grading::scorer::Scorer;

/// Everything loaded up front, before the first model call.
#[derive(Debug)]
pub struct GradingInputs {
    pub prompts: Vec<CriterionPrompt>,
    pub rubric: RubricTable,
    pub essays: Vec<EssaySource>,
}

/// Checks that every required path exists, then loads prompts, rubric and the essay list.
pub fn load_inputs(config: &GradingConfig) -> Result<GradingInputs, GraderError> {
    for (kind, path) in config.required_inputs() {
        require_exists(kind, path)?;
    }

    Ok(GradingInputs {
        prompts: load_prompts(&config.prompts_dir, &config.prompt_files)?,
        rubric: RubricTable::load(&config.rubric_path)?,
        essays: discover_essays(&config.essays_dir, &config.essay_extension)?,
    })
}

/// Grades every essay in `inputs` and writes the report. Returns the
/// evaluations in essay order.
pub async fn run(
    config: &GradingConfig,
    inputs: &GradingInputs,
    scorer: &Scorer,
) -> Result<Vec<EssayEvaluation>, GraderError> {
    info!(
        "Avaliando {} redação(ões) em {} critério(s)",
        inputs.essays.len(),
        inputs.prompts.len()
    );

    let mut results = Vec::with_capacity(inputs.essays.len());

    for source in &inputs.essays {
        let evaluation = match source.read() {
            Ok(essay) => {
                evaluate_essay(&essay, &inputs.prompts, &inputs.rubric, scorer, config.fallback_score)
                    .await
            }
            Err(e) => {
                error!("Falha ao ler a redação {}: {e}", source.name);
                let mut evaluation = EssayEvaluation::new(strip_extension(&source.name));
                evaluation.error = Some(e.to_string());
                evaluation
            }
        };

        info!(
            "Redação {} avaliada. Nota total: {}",
            evaluation.essay_name,
            evaluation.total_score()
        );
        results.push(evaluation);
        write_report(&config.output_path, &results)?;
    }

    if results.is_empty() {
        write_report(&config.output_path, &results)?;
    }

    info!("Resultados salvos em {}", config.output_path.display());
    Ok(results)
}

/// Scores one essay against every criterion, in prompt order.
///
/// Never fails: a non-numeric reply becomes `fallback_score`, and any other
/// error stops the essay and is recorded in `EssayEvaluation::error`.
pub async fn evaluate_essay(
    essay: &Essay,
    prompts: &[CriterionPrompt],
    rubric: &RubricTable,
    scorer: &Scorer,
    fallback_score: f64,
) -> EssayEvaluation {
    let mut evaluation = EssayEvaluation::new(essay.display_name());

    for prompt in prompts {
        let score = match scorer.score(prompt, &essay.text).await {
            Ok(score) => score,
            Err(GraderError::NonNumericOutput(raw)) => {
                warn!(
                    "Saída não numérica para {} no critério {}: {raw:?}. Usando nota {fallback_score}",
                    evaluation.essay_name, prompt.code
                );
                fallback_score
            }
            Err(e) => {
                error!(
                    "Avaliação de {} interrompida no critério {}: {e}",
                    evaluation.essay_name, prompt.code
                );
                evaluation.error = Some(format!("critério {}: {e}", prompt.code));
                break;
            }
        };

        evaluation.push(CriterionScore {
            criterion: prompt.code.clone(),
            score,
            description: rubric.describe(&prompt.code, score),
        });
    }

    evaluation
}

/// Inputs for grading one essay with the combined prompt.
#[derive(Debug)]
pub struct SingleInput {
    pub prompts: Vec<CriterionPrompt>,
    pub essay: String,
}

pub fn load_single(config: &GradingConfig, essay_path: &Path) -> Result<SingleInput, GraderError> {
    require_exists("arquivo de redação", essay_path)?;
    Ok(SingleInput {
        prompts: load_prompts(&config.prompts_dir, &config.prompt_files)?,
        essay: read_text(essay_path)?,
    })
}

/// Grades one essay against all criteria in a single combined call.
pub async fn grade_single(input: &SingleInput, scorer: &Scorer) -> Result<f64, GraderError> {
    scorer.score_combined(&input.prompts, &input.essay).await
}
