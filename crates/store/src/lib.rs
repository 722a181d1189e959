//! In-memory persistence for the consultation portal.
//!
//! Records live in `tokio::sync::RwLock`-guarded maps inside [`MemStore`]
//! and are lost on restart. Access goes through the per-entity repositories
//! in [`repositories`], mirroring a database-backed layout.

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

pub use store::{MemStore, Store};
