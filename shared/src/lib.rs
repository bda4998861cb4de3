use derive_more::Display;
use serde::{Deserialize, Serialize};

pub mod cycle;
pub mod emotion;
pub mod result;
pub mod view;

pub use emotion::{Emotion, resolve_advice};
pub use result::{ClassificationResult, EmotionScore, ResultError};

pub const ANIMATED_NOTICE: &str =
    "A GIF animation was detected. The first frame is used for analysis by default.";

pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// A decoded still frame, ready to show before analysis.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImagePreview {
    pub file_name: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub animated: bool,
    /// `data:image/png;base64,...` of frame 0.
    pub data_url: String,
}

impl ImagePreview {
    /// Informational caption shown above an animated source.
    pub fn notice(&self) -> Option<&'static str> {
        self.animated.then_some(ANIMATED_NOTICE)
    }
}

/// A classification paired with the advice for its top label.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisOutcome {
    pub result: ClassificationResult,
    pub advice: String,
    pub animated: bool,
    pub image_digest: String,
}

impl AnalysisOutcome {
    pub fn new(result: ClassificationResult, animated: bool, image_digest: String) -> Self {
        let advice = resolve_advice(&result.top().label);
        Self {
            result,
            advice,
            animated,
            image_digest,
        }
    }

    pub fn top(&self) -> &EmotionScore {
        self.result.top()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Percentage with one decimal place, e.g. `96.2%`.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display(fmt = "{:.1}%", _0)]
pub struct Percent(pub f64);

impl Percent {
    pub fn from_score(score: f64) -> Self {
        Percent(score * 100.0)
    }
}

/// The one user-facing message for any failed cycle.
pub fn failure_message(detail: impl std::fmt::Display) -> String {
    format!("Analysis failed: {}", detail)
}

pub fn is_accepted_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}
