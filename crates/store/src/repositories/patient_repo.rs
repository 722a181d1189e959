//! Repository for patients.

use chrono::Utc;
use medvision_core::types::EntityId;
use uuid::Uuid;

use crate::models::patient::{CreatePatient, Patient};
use crate::store::Store;

pub struct PatientRepo;

impl PatientRepo {
    pub async fn create(store: &Store, input: CreatePatient) -> Patient {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: input.name,
            age: input.age,
            medical_history: input.medical_history,
            created_at: Utc::now(),
        };
        store
            .patients
            .write()
            .await
            .insert(patient.id, patient.clone());
        patient
    }

    pub async fn find_by_id(store: &Store, id: EntityId) -> Option<Patient> {
        store.patients.read().await.get(&id).cloned()
    }

    /// All patients, newest first.
    pub async fn list(store: &Store) -> Vec<Patient> {
        let mut rows: Vec<Patient> = store.patients.read().await.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}
