//! Repository for scheduled video calls.

use chrono::Utc;
use medvision_core::portal::{
    video_call_url, DEFAULT_BOOKING_DURATION_MINS, VIDEO_CALL_SCHEDULED,
};
use medvision_core::types::EntityId;
use uuid::Uuid;

use crate::models::video_call::{ScheduleVideoCall, VideoCall};
use crate::store::Store;

pub struct VideoCallRepo;

impl VideoCallRepo {
    /// Schedule a call. The meeting URL embeds the consultation id and the
    /// creation time in milliseconds. A missing `scheduledTime` means now;
    /// the API validates its presence first.
    pub async fn create(store: &Store, input: ScheduleVideoCall) -> VideoCall {
        let now = Utc::now();
        let call = VideoCall {
            id: Uuid::new_v4(),
            meeting_url: video_call_url(&input.consultation_id, now.timestamp_millis()),
            consultation_id: input.consultation_id,
            doctor_id: input.doctor_id,
            patient_id: input.patient_id,
            scheduled_time: input.scheduled_time.unwrap_or(now),
            duration: input.duration.unwrap_or(DEFAULT_BOOKING_DURATION_MINS),
            status: VIDEO_CALL_SCHEDULED.to_string(),
            recording_url: None,
            notes: input.notes,
            created_at: now,
        };
        store
            .video_calls
            .write()
            .await
            .insert(call.id, call.clone());
        call
    }

    pub async fn find_by_id(store: &Store, id: EntityId) -> Option<VideoCall> {
        store.video_calls.read().await.get(&id).cloned()
    }
}
