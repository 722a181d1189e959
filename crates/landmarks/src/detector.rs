//! Subprocess runner for the face-mesh detector.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::config::LandmarkConfig;
use crate::error::LandmarkError;
use crate::output::{parse_output, MeshOutput};

/// Longest stderr excerpt carried in an error.
const STDERR_EXCERPT: usize = 500;

#[derive(Debug, Clone)]
pub struct FaceMeshDetector {
    config: LandmarkConfig,
}

impl FaceMeshDetector {
    pub fn new(config: LandmarkConfig) -> Self {
        Self { config }
    }

    /// Run `<command> <script> --image <path> --action landmarks` and parse
    /// its stdout. The child is killed if the timeout elapses.
    pub async fn detect(&self, image: &Path) -> Result<MeshOutput, LandmarkError> {
        let mut command = Command::new(&self.config.command);
        command
            .arg(&self.config.script)
            .arg("--image")
            .arg(image)
            .arg("--action")
            .arg("landmarks")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(LandmarkError::Spawn)?;
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| LandmarkError::Timeout(self.config.timeout_secs))?
            .map_err(LandmarkError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LandmarkError::ProcessFailed {
                status: output.status.to_string(),
                stderr: stderr.trim().chars().take(STDERR_EXCERPT).collect(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mesh = parse_output(&stdout)?;
        tracing::debug!(
            points = mesh.landmarks.len(),
            width = mesh.image_width,
            height = mesh.image_height,
            "face mesh detected"
        );
        Ok(mesh)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use assert_matches::assert_matches;

    use super::*;

    fn detector_with_script(dir: &tempfile::TempDir, body: &str, timeout_secs: u64) -> FaceMeshDetector {
        let script = dir.path().join("mesh.sh");
        std::fs::write(&script, body).unwrap();
        FaceMeshDetector::new(LandmarkConfig {
            command: "sh".into(),
            script,
            timeout_secs,
        })
    }

    #[tokio::test]
    async fn parses_script_output() {
        let dir = tempfile::tempdir().unwrap();
        let detector = detector_with_script(
            &dir,
            r#"printf '%s' '{"landmarks":[{"x":0.4,"y":0.6,"z":0}],"image_size":{"width":10,"height":20},"confidence":0.8}'"#,
            5,
        );
        let mesh = detector.detect(Path::new("face.jpg")).await.unwrap();
        assert_eq!(mesh.landmarks.len(), 1);
        assert_eq!(mesh.image_height, 20);
    }

    #[tokio::test]
    async fn script_receives_image_and_action_arguments() {
        let dir = tempfile::tempdir().unwrap();
        // Echo back "$2" (image path) and "$4" (action) through the error field.
        let detector = detector_with_script(
            &dir,
            r#"printf '{"success":false,"error":"%s %s"}' "$2" "$4""#,
            5,
        );
        let err = detector.detect(Path::new("/tmp/in.png")).await.unwrap_err();
        assert_matches!(
            err,
            LandmarkError::ProcessFailed { ref stderr, .. } if stderr == "/tmp/in.png landmarks"
        );
    }

    #[tokio::test]
    async fn non_zero_exit_is_process_failure() {
        let dir = tempfile::tempdir().unwrap();
        let detector = detector_with_script(&dir, "echo boom >&2\nexit 3", 5);
        let err = detector.detect(Path::new("x.jpg")).await.unwrap_err();
        assert_matches!(err, LandmarkError::ProcessFailed { ref stderr, .. } if stderr == "boom");
    }

    #[tokio::test]
    async fn slow_script_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let detector = detector_with_script(&dir, "sleep 5", 1);
        let err = detector.detect(Path::new("x.jpg")).await.unwrap_err();
        assert_matches!(err, LandmarkError::Timeout(1));
    }

    #[tokio::test]
    async fn missing_interpreter_is_spawn_error() {
        let detector = FaceMeshDetector::new(LandmarkConfig {
            command: "/nonexistent/interpreter".into(),
            script: PathBuf::from("mesh.py"),
            timeout_secs: 1,
        });
        let err = detector.detect(Path::new("x.jpg")).await.unwrap_err();
        assert_matches!(err, LandmarkError::Spawn(_));
    }
}
