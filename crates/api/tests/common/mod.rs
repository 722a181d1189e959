#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use medvision_ai::{OfflineGenerator, RemoteGenerator};
use medvision_api::config::ServerConfig;
use medvision_api::router::build_app_router;
use medvision_api::state::AppState;
use medvision_api::ws::WsManager;
use medvision_imaging::LocalFilterEngine;
use medvision_landmarks::{FaceMeshDetector, LandmarkConfig};
use medvision_store::MemStore;

pub const BOUNDARY: &str = "medvision-test-boundary";

/// Router plus the state behind it. The temp dir lives as long as the app.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the same router (and therefore the same store).
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` writing into `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: dir.path().join("uploads"),
        assets_dir: dir.path().join("assets"),
        max_upload_bytes: medvision_core::uploads::MAX_UPLOAD_BYTES,
    }
}

/// Full application with no remote AI and no face-mesh executable, so every
/// request takes the local path.
pub fn build_test_app() -> TestApp {
    build_test_app_with(Arc::new(OfflineGenerator))
}

pub fn build_test_app_with(generator: Arc<dyn RemoteGenerator>) -> TestApp {
    build(generator, |dir| LandmarkConfig {
        command: "medvision-test-missing-face-mesh".into(),
        script: dir.path().join("face_mesh.py"),
        timeout_secs: 5,
    })
}

/// Application whose face-mesh step always prints `mesh`, a detector JSON
/// document, through a `sh` script.
pub fn build_test_app_with_mesh(mesh: &serde_json::Value) -> TestApp {
    let mesh = mesh.to_string();
    build(Arc::new(OfflineGenerator), move |dir| {
        let output = dir.path().join("mesh.json");
        std::fs::write(&output, mesh).unwrap();
        let script = dir.path().join("face_mesh.sh");
        std::fs::write(&script, format!("cat '{}'\n", output.display())).unwrap();
        LandmarkConfig {
            command: "sh".into(),
            script,
            timeout_secs: 5,
        }
    })
}

fn build(
    generator: Arc<dyn RemoteGenerator>,
    landmarks: impl FnOnce(&TempDir) -> LandmarkConfig,
) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(&config.upload_dir).unwrap();

    let state = AppState {
        store: MemStore::new(),
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        generator,
        engine: Arc::new(LocalFilterEngine::new(config.upload_dir.clone())),
        landmarks: Arc::new(FaceMeshDetector::new(landmarks(&dir))),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        upload_dir: config.upload_dir,
        _dir: dir,
    }
}

/// A small skin-toned PNG.
pub fn sample_png() -> Vec<u8> {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        image::Rgb([180 + (x % 40) as u8, 130 + (y % 30) as u8, 110])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// One multipart part.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: Vec<u8>,
    },
}

impl<'a> Part<'a> {
    /// The sample PNG under the given field name.
    pub fn png(name: &'a str) -> Self {
        Part::File {
            name,
            file_name: "face.png",
            content_type: "image/png",
            data: sample_png(),
        }
    }
}

pub fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, json: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, json).await
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, json).await
}

pub async fn post_multipart(app: Router, uri: &str, parts: Vec<Part<'_>>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Map a `/uploads/<name>` URL back to the file on disk.
pub fn upload_path(app: &TestApp, url: &str) -> PathBuf {
    let name = url
        .strip_prefix("/uploads/")
        .unwrap_or_else(|| panic!("not an upload URL: {url}"));
    app.upload_dir.join(name)
}
