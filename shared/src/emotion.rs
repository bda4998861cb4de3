use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// The closed vocabulary the advice table is defined for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Disgust,
}

impl Emotion {
    /// Exact, case-sensitive match against the model label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::from_str(label).ok()
    }

    pub fn advice(self) -> &'static str {
        match self {
            Emotion::Neutral => {
                "The user is in a good state. Keep up the current rhythm of life and mindset, and engage in some relaxing activities to unwind."
            }
            Emotion::Happy => {
                "You're in a great mood! Share this joy with friends and family, and record the wonderful moments to double the happiness."
            }
            Emotion::Sad => {
                "It seems you're feeling a bit sad. Talk to someone close to you, or listen to some soothing music or watch a comedy movie to ease your mood."
            }
            Emotion::Angry => {
                "It looks like you're angry. Take a few deep breaths to calm down. You can also find an open space to shout and release the stress."
            }
            Emotion::Surprise => {
                "You've encountered a pleasant surprise! Enjoy this unexpected happiness and share the joy with those around you."
            }
            Emotion::Fear => {
                "If you're feeling scared, stay in a safe environment and be with someone you trust to feel more secure."
            }
            Emotion::Disgust => {
                "If you're feeling disgusted, try to stay away from the things that make you feel this way and do something that makes you happy to change your mood."
            }
        }
    }
}

/// Coping suggestion for the top label. Never fails: labels outside the
/// vocabulary get a message naming them.
pub fn resolve_advice(top_label: &str) -> String {
    match Emotion::from_label(top_label) {
        Some(emotion) => emotion.advice().to_string(),
        None => format!("no advice available for the emotion: {}", top_label),
    }
}
