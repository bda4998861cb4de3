use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use shared::ImagePreview;

use super::loader::{LoadedImage, format_name};

/// Frame 0 as a PNG data URL, so the page shows exactly what gets classified.
pub fn build_preview(file_name: &str, loaded: &LoadedImage) -> Result<ImagePreview, image::ImageError> {
    let png = loaded.bitmap.to_png()?;

    Ok(ImagePreview {
        file_name: file_name.to_string(),
        format: format_name(loaded.format).to_string(),
        width: loaded.bitmap.width(),
        height: loaded.bitmap.height(),
        animated: loaded.animated,
        data_url: format!("data:image/png;base64,{}", STANDARD.encode(png)),
    })
}
