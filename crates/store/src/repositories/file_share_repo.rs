//! Repository for files shared inside a consultation.

use chrono::Utc;
use uuid::Uuid;

use crate::models::file_share::{FileShare, NewFileShare};
use crate::store::Store;

pub struct FileShareRepo;

impl FileShareRepo {
    pub async fn create(store: &Store, input: NewFileShare) -> FileShare {
        let share = FileShare {
            id: Uuid::new_v4(),
            consultation_id: input.consultation_id,
            uploaded_by: input.uploaded_by,
            file_name: input.file_name,
            file_type: input.file_type,
            file_url: input.file_url,
            file_size: input.file_size,
            description: input.description,
            uploaded_at: Utc::now(),
        };
        store.file_shares.write().await.push(share.clone());
        share
    }

    /// Shared files of one consultation, newest first.
    pub async fn list_by_consultation(store: &Store, consultation_id: &str) -> Vec<FileShare> {
        store
            .file_shares
            .read()
            .await
            .iter()
            .rev()
            .filter(|f| f.consultation_id == consultation_id)
            .cloned()
            .collect()
    }
}
