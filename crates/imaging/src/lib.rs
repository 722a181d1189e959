//! Local filter engine.
//!
//! Deterministic raster transforms used whenever the hosted model is
//! unavailable: tone/color adjustment chains, SVG makeup overlays composited
//! with separable blend modes, and a simple quality report. All CPU work is
//! synchronous; [`engine::LocalFilterEngine`] moves it onto tokio's blocking
//! pool and handles file I/O.

pub mod adjust;
pub mod age;
pub mod analysis;
pub mod blend;
pub mod compare;
pub mod engine;
pub mod error;
pub mod face_effects;
pub mod makeup;
pub mod nose;
pub mod raster;
pub mod surgical;

pub use engine::{LocalFilterEngine, ProcessedFile};
pub use error::ImagingError;
