//! Landmark adapter.
//!
//! Runs an external face-mesh process on an image and parses its JSON
//! output into normalized [`medvision_core::regions::Landmark`]s. Region
//! mapping lives in `medvision_core::regions`; this crate only deals with
//! the subprocess and its output format.

pub mod config;
pub mod detector;
pub mod error;
pub mod output;

pub use config::LandmarkConfig;
pub use detector::FaceMeshDetector;
pub use error::LandmarkError;
pub use output::MeshOutput;
