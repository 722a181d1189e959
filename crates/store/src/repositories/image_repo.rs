//! Repository for uploaded image metadata.

use medvision_core::types::EntityId;

use crate::models::image::ImageMetadata;
use crate::store::Store;

pub struct ImageRepo;

impl ImageRepo {
    pub async fn insert(store: &Store, meta: ImageMetadata) -> ImageMetadata {
        store.images.write().await.insert(meta.id, meta.clone());
        meta
    }

    pub async fn find_by_id(store: &Store, id: EntityId) -> Option<ImageMetadata> {
        store.images.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemStore::new();
        let id = Uuid::new_v4();
        ImageRepo::insert(
            &store,
            ImageMetadata {
                id,
                filename: format!("{id}.png"),
                original_name: "face.png".into(),
                mime_type: "image/png".into(),
                size: 42,
                url: format!("/uploads/{id}.png"),
                uploaded_at: Utc::now(),
            },
        )
        .await;

        let found = ImageRepo::find_by_id(&store, id).await.expect("stored");
        assert_eq!(found.original_name, "face.png");
    }
}
