pub mod loader;
pub mod preview;

pub use loader::{Bitmap, DecodeError, LoadedImage};
