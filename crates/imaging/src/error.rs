/// Errors from local image processing. Only I/O, decoding and overlay
/// rendering can fail; the filters themselves are total.
#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Overlay rendering failed: {0}")]
    Overlay(String),

    #[error("Processing task failed: {0}")]
    Task(String),
}
