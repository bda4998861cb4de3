pub mod huggingface;

use async_trait::async_trait;
use shared::{ClassificationResult, ResultError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::imaging::Bitmap;

pub use huggingface::HuggingFaceClassifier;

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("classifier failed to initialise: {0}")]
    Init(String),
    #[error("could not prepare image for the classifier: {0}")]
    Encode(#[from] image::ImageError),
    #[error("classifier request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classifier returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("unexpected classifier response: {0}")]
    MalformedResponse(String),
    #[error("invalid classification: {0}")]
    InvalidResult(#[from] ResultError),
}

/// Pre-trained facial emotion model, used as a black box.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    fn name(&self) -> &str;

    async fn classify(&self, bitmap: &Bitmap) -> Result<ClassificationResult, ClassificationError>;
}

type Initializer =
    Box<dyn Fn() -> Result<Arc<dyn EmotionClassifier>, ClassificationError> + Send + Sync>;

/// Process-wide classifier, built on first use and shared read-only afterwards.
///
/// A failed initialisation is not cached; the next request tries again.
pub struct ClassifierHandle {
    cell: OnceCell<Arc<dyn EmotionClassifier>>,
    init: Initializer,
}

impl ClassifierHandle {
    pub fn lazy<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn EmotionClassifier>, ClassificationError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    #[cfg(test)]
    pub fn ready(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(classifier)),
            init: Box::new(|| Err(ClassificationError::Init("classifier already set".into()))),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<dyn EmotionClassifier>, ClassificationError> {
        self.cell
            .get_or_try_init(|| async {
                let started = Instant::now();
                match (self.init)() {
                    Ok(classifier) => {
                        log::info!(
                            "Classifier {} ready in {:?}",
                            classifier.name(),
                            started.elapsed()
                        );
                        Ok(classifier)
                    }
                    Err(e) => {
                        log::error!("Classifier initialisation failed: {}", e);
                        Err(e)
                    }
                }
            })
            .await
            .cloned()
    }
}
