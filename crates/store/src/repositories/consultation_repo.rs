//! Repository for visualization consultations.

use chrono::Utc;
use medvision_core::types::EntityId;
use uuid::Uuid;

use crate::models::consultation::{Consultation, CreateConsultation, UpdateConsultation};
use crate::store::Store;

/// Provides CRUD operations for consultations.
pub struct ConsultationRepo;

impl ConsultationRepo {
    pub async fn create(store: &Store, input: CreateConsultation) -> Consultation {
        let consultation = Consultation {
            id: Uuid::new_v4(),
            patient_id: input.patient_id,
            procedure_type: input.procedure_type,
            before_image_url: input.before_image_url,
            after_image_url: input.after_image_url,
            notes: input.notes,
            is_processing: input.is_processing.unwrap_or(false),
            ai_metadata: input.ai_metadata,
            created_at: Utc::now(),
        };
        store
            .consultations
            .write()
            .await
            .insert(consultation.id, consultation.clone());
        consultation
    }

    pub async fn find_by_id(store: &Store, id: EntityId) -> Option<Consultation> {
        store.consultations.read().await.get(&id).cloned()
    }

    /// All consultations, newest first.
    pub async fn list(store: &Store) -> Vec<Consultation> {
        let mut rows: Vec<Consultation> = store
            .consultations
            .read()
            .await
            .values()
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    /// All consultations of one patient, newest first.
    pub async fn list_by_patient(store: &Store, patient_id: EntityId) -> Vec<Consultation> {
        let mut rows: Vec<Consultation> = store
            .consultations
            .read()
            .await
            .values()
            .filter(|c| c.patient_id == Some(patient_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    /// Apply the non-`None` fields of `input`. Returns `None` if the id is unknown.
    pub async fn update(
        store: &Store,
        id: EntityId,
        input: UpdateConsultation,
    ) -> Option<Consultation> {
        let mut table = store.consultations.write().await;
        let row = table.get_mut(&id)?;
        if let Some(url) = input.after_image_url {
            row.after_image_url = Some(url);
        }
        if let Some(notes) = input.notes {
            row.notes = Some(notes);
        }
        if let Some(flag) = input.is_processing {
            row.is_processing = flag;
        }
        if let Some(meta) = input.ai_metadata {
            row.ai_metadata = Some(meta);
        }
        Some(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    fn rhinoplasty(patient_id: Option<EntityId>) -> CreateConsultation {
        CreateConsultation {
            patient_id,
            procedure_type: "rhinoplasty".into(),
            before_image_url: Some("/uploads/before.jpg".into()),
            after_image_url: None,
            notes: None,
            is_processing: Some(true),
            ai_metadata: None,
        }
    }

    #[tokio::test]
    async fn update_touches_only_given_fields() {
        let store = MemStore::new();
        let created = ConsultationRepo::create(&store, rhinoplasty(None)).await;

        let updated = ConsultationRepo::update(
            &store,
            created.id,
            UpdateConsultation {
                after_image_url: Some("/uploads/after.jpg".into()),
                is_processing: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("consultation exists");

        assert_eq!(updated.after_image_url.as_deref(), Some("/uploads/after.jpg"));
        assert!(!updated.is_processing);
        assert_eq!(updated.before_image_url.as_deref(), Some("/uploads/before.jpg"));
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = MemStore::new();
        let out = ConsultationRepo::update(&store, Uuid::new_v4(), UpdateConsultation::default()).await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn list_by_patient_filters_other_patients() {
        let store = MemStore::new();
        let mine = Uuid::new_v4();
        ConsultationRepo::create(&store, rhinoplasty(Some(mine))).await;
        ConsultationRepo::create(&store, rhinoplasty(Some(Uuid::new_v4()))).await;
        ConsultationRepo::create(&store, rhinoplasty(None)).await;

        assert_eq!(ConsultationRepo::list_by_patient(&store, mine).await.len(), 1);
    }
}
