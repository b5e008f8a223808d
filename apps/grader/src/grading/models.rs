use serde::{Deserialize, Serialize};

/// One criterion's instruction prompt, tagged with its short code (e.g. `c1`).
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionPrompt {
    pub code: String,
    pub text: String,
}

/// An essay as read from disk. `name` keeps the file extension.
#[derive(Debug, Clone, PartialEq)]
pub struct Essay {
    pub name: String,
    pub text: String,
}

impl Essay {
    /// Filename without its extension, used as the report's essay name.
    pub fn display_name(&self) -> &str {
        strip_extension(&self.name)
    }
}

/// `redacao1.txt` → `redacao1`. Leading-dot names are left alone.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Score and rubric text for a single criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    #[serde(rename = "criterio")]
    pub criterion: String,
    #[serde(rename = "nota")]
    pub score: f64,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Per-essay result record as written to the report.
///
/// `total_score` is derived from `scores` on every mutation and on
/// deserialization; a stored `nota_criterio` is never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EvaluationRecord")]
pub struct EssayEvaluation {
    #[serde(rename = "redacao_nome")]
    pub essay_name: String,
    #[serde(rename = "nota_criterio")]
    total_score: f64,
    #[serde(rename = "avaliacoes")]
    scores: Vec<CriterionScore>,
    /// Set when the evaluation stopped early; `scores` then holds what completed.
    #[serde(rename = "erro", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EssayEvaluation {
    pub fn new(essay_name: impl Into<String>) -> Self {
        Self {
            essay_name: essay_name.into(),
            total_score: 0.0,
            scores: Vec::new(),
            error: None,
        }
    }

    pub fn push(&mut self, score: CriterionScore) {
        self.scores.push(score);
        self.recompute_total();
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    #[cfg(test)]
    pub fn scores(&self) -> &[CriterionScore] {
        &self.scores
    }

    fn recompute_total(&mut self) {
        self.total_score = self.scores.iter().map(|s| s.score).sum();
    }
}

/// On-disk shape of an evaluation, minus the derived total.
#[derive(Deserialize)]
struct EvaluationRecord {
    #[serde(rename = "redacao_nome")]
    essay_name: String,
    #[serde(rename = "avaliacoes", default)]
    scores: Vec<CriterionScore>,
    #[serde(rename = "erro", default)]
    error: Option<String>,
}

impl From<EvaluationRecord> for EssayEvaluation {
    fn from(record: EvaluationRecord) -> Self {
        let mut evaluation = EssayEvaluation {
            essay_name: record.essay_name,
            total_score: 0.0,
            scores: record.scores,
            error: record.error,
        };
        evaluation.recompute_total();
        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(code: &str, value: f64) -> CriterionScore {
        CriterionScore {
            criterion: code.to_string(),
            score: value,
            description: String::new(),
        }
    }

    #[test]
    fn test_empty_evaluation_totals_zero() {
        let eval = EssayEvaluation::new("redacao1");
        assert_eq!(eval.total_score(), 0.0);
        assert!(eval.scores().is_empty());
    }

    #[test]
    fn test_total_tracks_sum_of_scores() {
        let mut eval = EssayEvaluation::new("redacao1");
        for (i, value) in [120.0, 80.0, 160.0, 40.5, 0.0].into_iter().enumerate() {
            eval.push(score(&format!("c{}", i + 1), value));
            let expected: f64 = eval.scores().iter().map(|s| s.score).sum();
            assert_eq!(eval.total_score(), expected);
        }
        assert!((eval.total_score() - 400.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut eval = EssayEvaluation::new("redacao1");
        eval.push(CriterionScore {
            criterion: "c1".to_string(),
            score: 80.0,
            description: "Bom domínio".to_string(),
        });
        let value = serde_json::to_value(&eval).unwrap();
        assert_eq!(value["redacao_nome"], "redacao1");
        assert_eq!(value["nota_criterio"], 80.0);
        assert_eq!(value["avaliacoes"][0]["criterio"], "c1");
        assert_eq!(value["avaliacoes"][0]["nota"], 80.0);
        assert_eq!(value["avaliacoes"][0]["descricao"], "Bom domínio");
        assert!(value.get("erro").is_none());
    }

    #[test]
    fn test_deserialize_ignores_stored_total() {
        let eval: EssayEvaluation = serde_json::from_str(
            r#"{"redacao_nome": "redacao1", "nota_criterio": 999.0,
                "avaliacoes": [
                    {"criterio": "c1", "nota": 40.0, "descricao": "Insuficiente"},
                    {"criterio": "c2", "nota": 80.0, "descricao": "Mediano"}
                ]}"#,
        )
        .unwrap();
        assert_eq!(eval.total_score(), 120.0);
        assert_eq!(eval.scores().len(), 2);
        assert!(eval.error.is_none());
    }

    #[test]
    fn test_deserialize_without_scores_totals_zero() {
        let eval: EssayEvaluation = serde_json::from_str(
            r#"{"redacao_nome": "redacao1", "nota_criterio": 80.0, "erro": "timeout"}"#,
        )
        .unwrap();
        assert_eq!(eval.total_score(), 0.0);
        assert_eq!(eval.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_display_name_strips_extension() {
        let essay = |name: &str| Essay {
            name: name.to_string(),
            text: String::new(),
        };
        assert_eq!(essay("redacao1.txt").display_name(), "redacao1");
        assert_eq!(essay("aluno.v2.txt").display_name(), "aluno.v2");
        assert_eq!(essay("sem_extensao").display_name(), "sem_extensao");
        assert_eq!(essay(".oculto").display_name(), ".oculto");
    }
}
