//! Storage trait for the media catalogue

use crate::catalogue::{self, CatalogueEntry, MembershipIndex, SortState};
use crate::error::Result;
use crate::types::{
    Collection, CollectionId, CollectionSummary, CreateCollection, CreateMedia, LinkMedia, Media,
    MediaId, MediaSummary, MembershipDiff, MetadataPair, MetadataSet, UpdateCollection,
    UpdateMedia, UserId,
};
use async_trait::async_trait;

/// Storage context providing access to catalogue operations
///
/// Reads of a single entity fail with `ShelfError::NotFound` when the id is
/// absent. Deleting a media item or a collection also removes every
/// membership that references it.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Media
    // ========================================================================

    /// Persist a validated media item and its metadata
    async fn create_media(&self, media: CreateMedia) -> Result<Media>;

    /// Get a media item with its metadata populated
    async fn get_media(&self, id: MediaId) -> Result<Media>;

    /// Get a media item's metadata pairs
    async fn get_media_metadata(&self, id: MediaId) -> Result<MetadataSet>;

    /// Apply a partial update; supplied metadata replaces the whole set
    async fn update_media(&self, id: MediaId, update: UpdateMedia) -> Result<Media>;

    /// Delete a media item and its memberships
    async fn delete_media(&self, id: MediaId) -> Result<()>;

    /// All media owned by `user_id`, in no particular order
    async fn list_media(&self, user_id: UserId) -> Result<Vec<Media>>;

    /// Add one metadata pair. Returns `false` if the name was already present.
    async fn add_media_metadata(&self, id: MediaId, pair: MetadataPair) -> Result<bool>;

    /// Remove a metadata pair by name
    async fn remove_media_metadata(&self, id: MediaId, name: &str) -> Result<()>;

    // ========================================================================
    // Collections
    // ========================================================================

    async fn create_collection(&self, collection: CreateCollection) -> Result<Collection>;

    async fn get_collection(&self, id: CollectionId) -> Result<Collection>;

    async fn update_collection(
        &self,
        id: CollectionId,
        update: UpdateCollection,
    ) -> Result<Collection>;

    /// Delete a collection and its memberships
    async fn delete_collection(&self, id: CollectionId) -> Result<()>;

    async fn list_collections(&self, user_id: UserId) -> Result<Vec<Collection>>;

    // ========================================================================
    // Memberships
    // ========================================================================

    /// Make the media item's memberships exactly `collection_ids`, atomically
    async fn replace_collections_for_media(
        &self,
        user_id: UserId,
        media_id: MediaId,
        collection_ids: &[CollectionId],
    ) -> Result<MembershipDiff>;

    /// Add a single membership. Returns `false` if the pair was already linked.
    async fn link_media(&self, link: LinkMedia) -> Result<bool>;

    /// Remove a single membership
    async fn unlink_media(&self, collection_id: CollectionId, media_id: MediaId) -> Result<()>;

    async fn list_collections_for_media(&self, media_id: MediaId)
        -> Result<Vec<CollectionSummary>>;

    async fn list_media_for_collection(
        &self,
        collection_id: CollectionId,
    ) -> Result<Vec<MediaSummary>>;

    /// Collection names for every media item owned by `user_id`
    async fn membership_index(&self, user_id: UserId) -> Result<MembershipIndex>;

    // ========================================================================
    // Catalogue
    // ========================================================================

    /// Filtered, sorted catalogue view for `user_id`
    async fn query_catalogue(
        &self,
        user_id: UserId,
        filter: &str,
        sort: SortState,
    ) -> Result<Vec<CatalogueEntry>> {
        let media = self.list_media(user_id).await?;
        let index = self.membership_index(user_id).await?;
        Ok(catalogue::entries(media, &index, filter, sort))
    }
}
