//! Repository for doctors.

use chrono::Utc;
use medvision_core::portal::map_specialty;
use medvision_core::types::EntityId;
use uuid::Uuid;

use crate::models::doctor::{Doctor, NewDoctor};
use crate::store::Store;

pub struct DoctorRepo;

impl DoctorRepo {
    /// Insert an active doctor.
    pub async fn create(store: &Store, input: NewDoctor) -> Doctor {
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: input.name,
            specialty: input.specialty,
            experience: input.experience,
            rating: input.rating,
            avatar: input.avatar,
            bio: input.bio,
            hourly_rate: input.hourly_rate,
            availability: None,
            email: input.email,
            phone: input.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        store
            .doctors
            .write()
            .await
            .insert(doctor.id, doctor.clone());
        doctor
    }

    pub async fn find_by_id(store: &Store, id: EntityId) -> Option<Doctor> {
        store.doctors.read().await.get(&id).cloned()
    }

    /// Active doctors, optionally filtered by a specialty keyword
    /// (`rhinoplasty`, `facial`, ...) or an exact specialty name.
    ///
    /// Ordered by rating, best first, then by name.
    pub async fn list_active(store: &Store, specialty: Option<&str>) -> Vec<Doctor> {
        let wanted = specialty.map(map_specialty);
        let mut rows: Vec<Doctor> = store
            .doctors
            .read()
            .await
            .values()
            .filter(|d| d.is_active)
            .filter(|d| wanted.map_or(true, |s| d.specialty == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.name.cmp(&b.name))
        });
        rows
    }

    pub async fn count(store: &Store) -> usize {
        store.doctors.read().await.len()
    }
}
