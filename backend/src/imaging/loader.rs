use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageDecoder, ImageFormat, Limits};
use std::io::Cursor;
use std::path::Path;

pub const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif];

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("file is not a recognised image")]
    Unrecognized,
    #[error("animation contains no frames")]
    NoFrames,
    #[error("image of {width}x{height} exceeds the decoding memory limit")]
    TooLarge { width: u32, height: u32 },
    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// A single decoded still frame.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: DynamicImage,
}

impl Bitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[cfg(test)]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub bitmap: Bitmap,
    /// Format sniffed from the bytes, not the declared one.
    pub format: ImageFormat,
    /// The source had more than one frame; `bitmap` is frame 0.
    pub animated: bool,
}

pub fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("unknown")
}

/// Declared format from the uploaded file name's extension.
pub fn declared_format(file_name: &str) -> Result<ImageFormat, DecodeError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| DecodeError::UnsupportedFormat(file_name.to_string()))?;

    match ImageFormat::from_extension(extension) {
        Some(format) if SUPPORTED_FORMATS.contains(&format) => Ok(format),
        _ => Err(DecodeError::UnsupportedFormat(extension.to_string())),
    }
}

pub fn load(bytes: &[u8], declared: ImageFormat) -> Result<LoadedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    if !SUPPORTED_FORMATS.contains(&declared) {
        return Err(DecodeError::UnsupportedFormat(format_name(declared).to_string()));
    }

    let sniffed = image::guess_format(bytes).map_err(|_| DecodeError::Unrecognized)?;
    if !SUPPORTED_FORMATS.contains(&sniffed) {
        return Err(DecodeError::UnsupportedFormat(format_name(sniffed).to_string()));
    }
    if sniffed != declared {
        log::warn!(
            "Declared format {} but content is {}, decoding as {}",
            format_name(declared),
            format_name(sniffed),
            format_name(sniffed)
        );
    }

    match sniffed {
        ImageFormat::Gif => load_first_frame(bytes),
        format => {
            let image = image::load_from_memory_with_format(bytes, format)?;
            Ok(LoadedImage {
                bitmap: Bitmap::new(image),
                format,
                animated: false,
            })
        }
    }
}

fn load_first_frame(bytes: &[u8]) -> Result<LoadedImage, DecodeError> {
    let mut decoder = GifDecoder::new(Cursor::new(bytes))?;
    let limits = Limits::default();

    // Frames are composited on an RGBA canvas of the declared screen size.
    let (width, height) = decoder.dimensions();
    let canvas_bytes = u64::from(width) * u64::from(height) * 4;
    if limits.max_alloc.is_some_and(|max| canvas_bytes > max) {
        return Err(DecodeError::TooLarge { width, height });
    }
    decoder.set_limits(limits)?;

    let mut frames = decoder.into_frames();
    let first = frames.next().ok_or(DecodeError::NoFrames)??;
    let animated = frames.next().is_some();

    Ok(LoadedImage {
        bitmap: Bitmap::new(DynamicImage::ImageRgba8(first.into_buffer())),
        format: ImageFormat::Gif,
        animated,
    })
}
