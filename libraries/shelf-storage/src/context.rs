use crate::{collections, media, memberships, metadata};
use async_trait::async_trait;
use shelf_core::{
    catalogue::MembershipIndex, error::Result, storage::StorageContext, types::*, ShelfError,
};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Media
    async fn create_media(&self, media: CreateMedia) -> Result<Media> {
        media::create(&self.pool, media).await
    }

    async fn get_media(&self, id: MediaId) -> Result<Media> {
        media::get_with_metadata(&self.pool, id)
            .await?
            .ok_or_else(|| ShelfError::not_found("Media", id))
    }

    async fn get_media_metadata(&self, id: MediaId) -> Result<MetadataSet> {
        if media::get_by_id(&self.pool, id).await?.is_none() {
            return Err(ShelfError::not_found("Media", id));
        }
        metadata::get_for_media(&self.pool, id).await
    }

    async fn update_media(&self, id: MediaId, update: UpdateMedia) -> Result<Media> {
        media::update(&self.pool, id, update).await
    }

    async fn delete_media(&self, id: MediaId) -> Result<()> {
        media::delete(&self.pool, id).await
    }

    async fn list_media(&self, user_id: UserId) -> Result<Vec<Media>> {
        media::get_all(&self.pool, user_id).await
    }

    async fn add_media_metadata(&self, id: MediaId, pair: MetadataPair) -> Result<bool> {
        metadata::add(&self.pool, id, pair).await
    }

    async fn remove_media_metadata(&self, id: MediaId, name: &str) -> Result<()> {
        metadata::remove(&self.pool, id, name).await
    }

    // Collections
    async fn create_collection(&self, collection: CreateCollection) -> Result<Collection> {
        collections::create(&self.pool, collection).await
    }

    async fn get_collection(&self, id: CollectionId) -> Result<Collection> {
        collections::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| ShelfError::not_found("Collection", id))
    }

    async fn update_collection(
        &self,
        id: CollectionId,
        update: UpdateCollection,
    ) -> Result<Collection> {
        collections::update(&self.pool, id, update).await
    }

    async fn delete_collection(&self, id: CollectionId) -> Result<()> {
        collections::delete(&self.pool, id).await
    }

    async fn list_collections(&self, user_id: UserId) -> Result<Vec<Collection>> {
        collections::get_all(&self.pool, user_id).await
    }

    // Memberships
    async fn replace_collections_for_media(
        &self,
        user_id: UserId,
        media_id: MediaId,
        collection_ids: &[CollectionId],
    ) -> Result<MembershipDiff> {
        memberships::replace_for_media(&self.pool, user_id, media_id, collection_ids).await
    }

    async fn link_media(&self, link: LinkMedia) -> Result<bool> {
        memberships::link(&self.pool, link).await
    }

    async fn unlink_media(&self, collection_id: CollectionId, media_id: MediaId) -> Result<()> {
        memberships::unlink(&self.pool, collection_id, media_id).await
    }

    async fn list_collections_for_media(
        &self,
        media_id: MediaId,
    ) -> Result<Vec<CollectionSummary>> {
        memberships::get_collections_for_media(&self.pool, media_id).await
    }

    async fn list_media_for_collection(
        &self,
        collection_id: CollectionId,
    ) -> Result<Vec<MediaSummary>> {
        memberships::get_media_for_collection(&self.pool, collection_id).await
    }

    async fn membership_index(&self, user_id: UserId) -> Result<MembershipIndex> {
        memberships::index_for_user(&self.pool, user_id).await
    }
}
