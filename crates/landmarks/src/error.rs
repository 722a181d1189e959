/// Why a detection run produced no landmarks. Callers treat every variant
/// the same way (static fallback layout); the distinction is for logs.
#[derive(Debug, thiserror::Error)]
pub enum LandmarkError {
    #[error("Failed to start face-mesh process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Face-mesh process timed out after {0}s")]
    Timeout(u64),

    #[error("Face-mesh process failed ({status}): {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("No face detected")]
    NoFace,

    #[error("Unparsable face-mesh output: {0}")]
    Parse(String),
}
