use std::collections::HashMap;
use std::sync::Arc;

use medvision_core::types::EntityId;
use tokio::sync::RwLock;

use crate::models::booking::BookingConsultation;
use crate::models::consultation::Consultation;
use crate::models::doctor::Doctor;
use crate::models::file_share::FileShare;
use crate::models::image::ImageMetadata;
use crate::models::message::Message;
use crate::models::patient::Patient;
use crate::models::video_call::VideoCall;

/// Shared handle passed to repositories.
pub type Store = Arc<MemStore>;

/// One lock per table. Messages and file shares keep insertion order.
#[derive(Debug, Default)]
pub struct MemStore {
    pub(crate) patients: RwLock<HashMap<EntityId, Patient>>,
    pub(crate) consultations: RwLock<HashMap<EntityId, Consultation>>,
    pub(crate) doctors: RwLock<HashMap<EntityId, Doctor>>,
    pub(crate) bookings: RwLock<HashMap<EntityId, BookingConsultation>>,
    pub(crate) messages: RwLock<Vec<Message>>,
    pub(crate) video_calls: RwLock<HashMap<EntityId, VideoCall>>,
    pub(crate) file_shares: RwLock<Vec<FileShare>>,
    pub(crate) images: RwLock<HashMap<EntityId, ImageMetadata>>,
}

impl MemStore {
    pub fn new() -> Store {
        Arc::new(Self::default())
    }
}
