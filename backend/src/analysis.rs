use image::ImageFormat;
use sha2::{Digest, Sha256};
use shared::{AnalysisOutcome, ImagePreview};
use std::time::Instant;

use crate::classifier::{ClassificationError, ClassifierHandle};
use crate::imaging::{self, DecodeError, LoadedImage};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

pub fn image_digest(image_data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image_data);
    hex::encode(hasher.finalize())
}

/// Decode an upload for display, without touching the classifier.
pub fn preview(file_name: &str, image_data: &[u8]) -> Result<ImagePreview, AnalysisError> {
    let loaded = decode(file_name, image_data)?;
    imaging::preview::build_preview(file_name, &loaded)
        .map_err(|e| AnalysisError::Decode(DecodeError::Image(e)))
}

/// One analysis cycle: decode, classify frame 0, resolve advice.
pub async fn analyze(
    handle: &ClassifierHandle,
    file_name: &str,
    image_data: &[u8],
) -> Result<AnalysisOutcome, AnalysisError> {
    let digest = image_digest(image_data);
    let loaded = decode(file_name, image_data)?;
    if loaded.animated {
        log::info!("{}: animated source, classifying frame 0 only", digest);
    }

    let classifier = handle.get().await?;
    let started = Instant::now();
    let result = classifier.classify(&loaded.bitmap).await.inspect_err(|e| {
        log::error!("{}: classification by {} failed: {}", digest, classifier.name(), e);
    })?;

    let outcome = AnalysisOutcome::new(result, loaded.animated, digest);
    log::info!(
        "{}: top emotion {} ({:.3}) from {} labels in {:?}",
        outcome.image_digest,
        outcome.top().label,
        outcome.top().score,
        outcome.result.scores().len(),
        started.elapsed()
    );
    Ok(outcome)
}

fn decode(file_name: &str, image_data: &[u8]) -> Result<LoadedImage, DecodeError> {
    let declared: ImageFormat = imaging::loader::declared_format(file_name)?;
    let loaded = imaging::loader::load(image_data, declared)?;
    log::info!(
        "Decoded {} ({} bytes) as {} {}x{}",
        file_name,
        image_data.len(),
        imaging::loader::format_name(loaded.format),
        loaded.bitmap.width(),
        loaded.bitmap.height()
    );
    Ok(loaded)
}
