//! What the results panel shows for one outcome, independent of the widget toolkit.

use crate::{AnalysisOutcome, Percent};

pub const METRIC_TITLE: &str = "Main Emotion";
pub const DISTRIBUTION_TITLE: &str = "Emotion Distribution:";
pub const ADVICE_TITLE: &str = "Coping Advice";

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorView {
    pub caption: String,
    /// Bar fill, clamped to `[0, 1]`.
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeView {
    pub metric_value: String,
    pub metric_delta: String,
    pub indicators: Vec<IndicatorView>,
    pub advice: String,
}

impl OutcomeView {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let top = outcome.top();
        let indicators = outcome
            .result
            .scores()
            .iter()
            .map(|score| IndicatorView {
                caption: format!(
                    "{}: {}",
                    capitalize(&score.label),
                    Percent::from_score(score.score)
                ),
                fraction: score.score.clamp(0.0, 1.0) as f32,
            })
            .collect();

        Self {
            metric_value: top.label.clone(),
            metric_delta: format!("{} confidence", Percent::from_score(top.score)),
            indicators,
            advice: outcome.advice.clone(),
        }
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
