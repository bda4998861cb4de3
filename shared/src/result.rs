use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One `(label, confidence)` pair as reported by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResultError {
    #[error("classifier returned no predictions")]
    Empty,
    #[error("score {score} for label '{label}' is outside [0, 1]")]
    ScoreOutOfRange { label: String, score: f64 },
}

/// Label/confidence pairs for one bitmap, highest confidence first.
///
/// Only constructed through [`ClassificationResult::new`], which rejects empty
/// lists and scores outside `[0, 1]` and sorts the rest, so `top()` is always
/// the arg-max. Deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EmotionScore>", into = "Vec<EmotionScore>")]
pub struct ClassificationResult {
    scores: Vec<EmotionScore>,
}

impl ClassificationResult {
    pub fn new(mut scores: Vec<EmotionScore>) -> Result<Self, ResultError> {
        if scores.is_empty() {
            return Err(ResultError::Empty);
        }

        if let Some(bad) = scores
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.score))
        {
            return Err(ResultError::ScoreOutOfRange {
                label: bad.label.clone(),
                score: bad.score,
            });
        }

        // Stable, so ties keep the classifier's order.
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(Self { scores })
    }

    pub fn top(&self) -> &EmotionScore {
        &self.scores[0]
    }

    pub fn scores(&self) -> &[EmotionScore] {
        &self.scores
    }

}

impl TryFrom<Vec<EmotionScore>> for ClassificationResult {
    type Error = ResultError;

    fn try_from(scores: Vec<EmotionScore>) -> Result<Self, Self::Error> {
        Self::new(scores)
    }
}

impl From<ClassificationResult> for Vec<EmotionScore> {
    fn from(result: ClassificationResult) -> Self {
        result.scores
    }
}
