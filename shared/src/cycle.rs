//! One analysis cycle on the page: `Idle -> ImageLoaded -> Classifying -> Displayed | Failed`.
//!
//! Every upload bumps the generation. Responses carry the generation they were
//! requested under and are ignored once a newer upload has started.

use crate::{AnalysisOutcome, ImagePreview};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle { loading: bool },
    ImageLoaded { preview: ImagePreview },
    Classifying { preview: ImagePreview },
    Displayed { preview: ImagePreview, outcome: AnalysisOutcome },
    Failed { preview: Option<ImagePreview>, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisCycle {
    generation: u64,
    phase: Phase,
}

impl Default for AnalysisCycle {
    fn default() -> Self {
        Self {
            generation: 0,
            phase: Phase::Idle { loading: false },
        }
    }
}

impl AnalysisCycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        match &self.phase {
            Phase::Idle { .. } => None,
            Phase::ImageLoaded { preview }
            | Phase::Classifying { preview }
            | Phase::Displayed { preview, .. } => Some(preview),
            Phase::Failed { preview, .. } => preview.as_ref(),
        }
    }

    /// Text for the error banner. A fresh `notice` (e.g. a rejected file) wins
    /// over the failure that ended the current cycle.
    pub fn banner<'a>(&'a self, notice: Option<&'a str>) -> Option<&'a str> {
        notice.or(match &self.phase {
            Phase::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::Classifying { .. } | Phase::Idle { loading: true }
        )
    }

    /// A new file was chosen. Returns the generation the preview request must carry.
    pub fn upload(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Idle { loading: true };
        self.generation
    }

    /// Dropping the file abandons whatever was in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle { loading: false };
    }

    /// Returns false when the response belongs to an abandoned cycle.
    pub fn preview_loaded(&mut self, generation: u64, preview: Result<ImagePreview, String>) -> bool {
        if generation != self.generation || !matches!(self.phase, Phase::Idle { loading: true }) {
            return false;
        }

        self.phase = match preview {
            Ok(preview) => Phase::ImageLoaded { preview },
            Err(message) => Phase::Failed {
                preview: None,
                message,
            },
        };
        true
    }

    /// Explicit user trigger. Also restarts a finished cycle on the same image.
    /// Returns the generation the analysis request must carry.
    pub fn trigger(&mut self) -> Option<u64> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle { loading: false });
        let (next, started) = match phase {
            Phase::ImageLoaded { preview }
            | Phase::Displayed { preview, .. }
            | Phase::Failed {
                preview: Some(preview),
                ..
            } => (Phase::Classifying { preview }, true),
            other => (other, false),
        };
        self.phase = next;
        started.then_some(self.generation)
    }

    /// Returns false when the response belongs to an abandoned cycle.
    pub fn finished(&mut self, generation: u64, outcome: Result<AnalysisOutcome, String>) -> bool {
        if generation != self.generation {
            return false;
        }

        let phase = std::mem::replace(&mut self.phase, Phase::Idle { loading: false });
        match phase {
            Phase::Classifying { preview } => {
                self.phase = match outcome {
                    Ok(outcome) => Phase::Displayed { preview, outcome },
                    Err(message) => Phase::Failed {
                        preview: Some(preview),
                        message,
                    },
                };
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }
}
