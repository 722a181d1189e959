use std::path::PathBuf;

/// Face-mesh subprocess configuration.
#[derive(Debug, Clone)]
pub struct LandmarkConfig {
    /// Interpreter or executable (default: `python3`).
    pub command: String,
    /// Script passed as the first argument (default: `scripts/face_mesh.py`).
    pub script: PathBuf,
    /// Hard limit on one detection run, in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl LandmarkConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                |
    /// |-------------------------|------------------------|
    /// | `LANDMARK_COMMAND`      | `python3`              |
    /// | `LANDMARK_SCRIPT`       | `scripts/face_mesh.py` |
    /// | `LANDMARK_TIMEOUT_SECS` | `30`                   |
    pub fn from_env() -> Self {
        let command = std::env::var("LANDMARK_COMMAND").unwrap_or_else(|_| "python3".into());

        let script = std::env::var("LANDMARK_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("scripts/face_mesh.py"));

        let timeout_secs: u64 = std::env::var("LANDMARK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("LANDMARK_TIMEOUT_SECS must be a valid u64");

        Self {
            command,
            script,
            timeout_secs,
        }
    }
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            command: "python3".into(),
            script: PathBuf::from("scripts/face_mesh.py"),
            timeout_secs: 30,
        }
    }
}
