//! Membership (media ↔ collection) types

use super::ids::{CollectionId, MediaId, UserId};
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};

/// Link between one media item and one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub collection_id: CollectionId,
    pub media_id: MediaId,
    pub user_id: UserId,
    pub date_added: String,
    pub rating: Option<i32>,
}

/// Request to make a media item's collections exactly `collection_ids`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplaceMemberships {
    pub user_id: Option<UserId>,
    pub media_id: Option<MediaId>,
    /// Required; an explicit empty list clears every membership
    pub collection_ids: Option<Vec<CollectionId>>,
}

/// Raw single-link request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkInput {
    pub user_id: Option<UserId>,
    pub collection_id: Option<CollectionId>,
    pub media_id: Option<MediaId>,
    pub rating: Option<i32>,
}

/// Validated single-link request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMedia {
    pub user_id: UserId,
    pub collection_id: CollectionId,
    pub media_id: MediaId,
    pub rating: Option<i32>,
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

impl LinkInput {
    pub fn validate(self) -> Result<LinkMedia> {
        let mut invalid = Vec::new();
        let user_id = self.user_id.filter(|id| *id > 0);
        if user_id.is_none() {
            invalid.push("user_id");
        }
        if self.collection_id.is_none() {
            invalid.push("collection_id");
        }
        if self.media_id.is_none() {
            invalid.push("media_id");
        }
        if self
            .rating
            .is_some_and(|r| !(MIN_RATING..=MAX_RATING).contains(&r))
        {
            invalid.push("rating");
        }

        match (user_id, self.collection_id, self.media_id) {
            (Some(user_id), Some(collection_id), Some(media_id)) if invalid.is_empty() => {
                Ok(LinkMedia {
                    user_id,
                    collection_id,
                    media_id,
                    rating: self.rating,
                })
            }
            _ => Err(ShelfError::validation(invalid)),
        }
    }
}

impl ReplaceMemberships {
    /// Check the required fields are present, returning
    /// `(user_id, media_id, collection_ids)`
    pub fn required_fields(&self) -> Result<(UserId, MediaId, &[CollectionId])> {
        match (
            self.user_id.filter(|id| *id > 0),
            self.media_id,
            self.collection_ids.as_deref(),
        ) {
            (Some(user_id), Some(media_id), Some(ids)) => Ok((user_id, media_id, ids)),
            (user_id, media_id, ids) => {
                let mut invalid = Vec::new();
                if user_id.is_none() {
                    invalid.push("user_id");
                }
                if media_id.is_none() {
                    invalid.push("media_id");
                }
                if ids.is_none() {
                    invalid.push("collection_ids");
                }
                Err(ShelfError::validation(invalid))
            }
        }
    }
}

/// Outcome of a replace-all on a media item's memberships
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipDiff {
    pub added: Vec<CollectionId>,
    pub removed: Vec<CollectionId>,
    pub unchanged: Vec<CollectionId>,
}

impl MembershipDiff {
    /// Compute the diff between the current and target collection sets.
    ///
    /// Duplicate target ids are collapsed. Output vectors are sorted.
    pub fn between(current: &[CollectionId], target: &[CollectionId]) -> Self {
        let mut target: Vec<CollectionId> = target.to_vec();
        target.sort_unstable();
        target.dedup();

        let mut diff = MembershipDiff::default();
        for id in &target {
            if current.contains(id) {
                diff.unchanged.push(*id);
            } else {
                diff.added.push(*id);
            }
        }
        diff.removed = current
            .iter()
            .copied()
            .filter(|id| !target.contains(id))
            .collect();
        diff.removed.sort_unstable();
        diff
    }

    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
