//! Repository for doctor appointments.

use chrono::Utc;
use medvision_core::portal::{
    booking_meeting_link, DEFAULT_BOOKING_DURATION_MINS, GUEST_USER_ID, STATUS_PENDING,
};
use medvision_core::types::EntityId;
use uuid::Uuid;

use crate::models::booking::{BookingConsultation, BookingFilter, BookingWithDoctor, NewBooking};
use crate::store::Store;

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Create a pending booking for a guest user. The caller resolves the
    /// doctor and sets the price.
    pub async fn create(store: &Store, input: NewBooking) -> BookingConsultation {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let booking = BookingConsultation {
            id,
            user_id: GUEST_USER_ID.to_string(),
            doctor_id: input.doctor_id,
            appointment_date: input.appointment_date,
            duration: input.duration.unwrap_or(DEFAULT_BOOKING_DURATION_MINS),
            status: STATUS_PENDING.to_string(),
            consultation_type: input.consultation_type,
            notes: input.notes.unwrap_or_default(),
            meeting_link: booking_meeting_link(id),
            price: input.price,
            patient_name: input.patient_name,
            patient_phone: input.patient_phone,
            created_at: now,
            updated_at: now,
        };
        store.bookings.write().await.insert(id, booking.clone());
        booking
    }

    pub async fn find_by_id(store: &Store, id: EntityId) -> Option<BookingConsultation> {
        store.bookings.read().await.get(&id).cloned()
    }

    /// Booking joined with its doctor.
    pub async fn find_with_doctor(store: &Store, id: EntityId) -> Option<BookingWithDoctor> {
        let consultation = Self::find_by_id(store, id).await?;
        let doctor = store
            .doctors
            .read()
            .await
            .get(&consultation.doctor_id)
            .cloned();
        Some(BookingWithDoctor {
            consultation,
            doctor,
        })
    }

    /// Bookings matching `filter`, newest first, each joined with its doctor.
    pub async fn list(store: &Store, filter: &BookingFilter) -> Vec<BookingWithDoctor> {
        let phone = filter.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());
        let mut rows: Vec<BookingConsultation> = store
            .bookings
            .read()
            .await
            .values()
            .filter(|b| filter.doctor_id.map_or(true, |id| b.doctor_id == id))
            .filter(|b| phone.map_or(true, |p| b.patient_phone == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let doctors = store.doctors.read().await;
        rows.into_iter()
            .map(|consultation| {
                let doctor = doctors.get(&consultation.doctor_id).cloned();
                BookingWithDoctor {
                    consultation,
                    doctor,
                }
            })
            .collect()
    }

    /// All bookings made with `phone`, newest first.
    pub async fn list_by_phone(store: &Store, phone: &str) -> Vec<BookingWithDoctor> {
        let filter = BookingFilter {
            phone: Some(phone.to_string()),
            ..BookingFilter::default()
        };
        Self::list(store, &filter).await
    }

    /// Set the status and bump `updated_at`. The caller validates `status`.
    pub async fn update_status(
        store: &Store,
        id: EntityId,
        status: &str,
    ) -> Option<BookingConsultation> {
        let mut table = store.bookings.write().await;
        let row = table.get_mut(&id)?;
        row.status = status.to_string();
        row.updated_at = Utc::now();
        Some(row.clone())
    }
}
