use serde::Serialize;
use serde_json::Value;

use crate::model::payload::{Payload, PredictionEntry};
use crate::model::threshold::{Grade, THRESHOLD, qualifies};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub grade: Grade,
    pub threshold: f64,
    pub inspected: usize,
    pub qualifying: Vec<String>,
    pub max_score: Option<f64>,
}

/// Returns `Detected` when any prediction under `data.predictions` scores
/// strictly above the threshold. Never fails: malformed shapes grade `Clear`.
pub fn evaluate(payload: &Value) -> Grade {
    let hit = Payload::new(payload).predictions().any(|entry| entry_qualifies(&entry));
    Grade::from_hit(hit)
}

pub fn explain(payload: &Value) -> GradeReport {
    let mut inspected = 0usize;
    let mut qualifying = Vec::new();
    let mut max_score: Option<f64> = None;

    for entry in Payload::new(payload).predictions() {
        inspected += 1;
        if let Some(score) = entry.prediction.score {
            max_score = Some(max_score.map_or(score, |m| m.max(score)));
        }
        if entry_qualifies(&entry) {
            qualifying.push(entry.id.into_owned());
        }
    }

    GradeReport {
        grade: Grade::from_hit(!qualifying.is_empty()),
        threshold: THRESHOLD,
        inspected,
        qualifying,
        max_score,
    }
}

fn entry_qualifies(entry: &PredictionEntry<'_>) -> bool {
    let hit = entry.prediction.score.is_some_and(qualifies);
    tracing::debug!(
        id = %entry.id,
        label = entry.prediction.label_name().unwrap_or("-"),
        score = ?entry.prediction.score,
        hit,
        "prediction considered"
    );
    hit
}

#[cfg(test)]
#[path = "../tests/src_inline/grader.rs"]
mod tests;
