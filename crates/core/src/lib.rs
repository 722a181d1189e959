//! Domain types and pure functions shared by every MedVision crate.
//!
//! Nothing here touches the filesystem, the network or a runtime: color math,
//! SVG overlay markup, effect/procedure identifiers, face-region index tables
//! and the portal's status constants all live here so the imaging, AI and API
//! crates agree on one vocabulary.

pub mod color;
pub mod effects;
pub mod error;
pub mod lenient;
pub mod makeup;
pub mod overlay;
pub mod portal;
pub mod regions;
pub mod types;
pub mod uploads;
