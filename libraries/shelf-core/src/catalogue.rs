//! Catalogue query engine
//!
//! Pure filtering and sorting over a user's media list joined with their
//! collection memberships. Nothing here fails: missing values degrade to
//! the empty string, and an item with no collections is represented by the
//! [`DRAFT`] token for both filtering and sorting.

use crate::types::{Media, MediaId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Collections text of an item that belongs to no collection
pub const DRAFT: &str = "draft";

/// Derived collections text: names joined by `", "`, lower-cased, or
/// [`DRAFT`] when there are none.
pub fn collections_text<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return DRAFT.to_string();
    }
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
        .to_lowercase()
}

/// Collection names per media item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipIndex {
    names: HashMap<MediaId, Vec<String>>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, media_id: MediaId, collection_name: impl Into<String>) {
        self.names
            .entry(media_id)
            .or_default()
            .push(collection_name.into());
    }

    /// Names of the collections linking to `media_id`, empty if none
    pub fn collections_for(&self, media_id: MediaId) -> &[String] {
        self.names.get(&media_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn collections_text(&self, media_id: MediaId) -> String {
        collections_text(self.collections_for(media_id))
    }
}

impl FromIterator<(MediaId, String)> for MembershipIndex {
    fn from_iter<I: IntoIterator<Item = (MediaId, String)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (media_id, name) in iter {
            index.insert(media_id, name);
        }
        index
    }
}

/// Column the catalogue is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Creator,
    Type,
    Status,
    Collections,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Creator => "creator",
            SortKey::Type => "type",
            SortKey::Status => "status",
            SortKey::Collections => "collections",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Some(SortKey::Title),
            "creator" => Some(SortKey::Creator),
            "type" => Some(SortKey::Type),
            "status" => Some(SortKey::Status),
            "collections" => Some(SortKey::Collections),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Column-header sort state as the list view tracks it.
///
/// Selecting the current key flips the direction; selecting a different
/// key switches to it in ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn select(self, key: SortKey) -> Self {
        if key == self.key {
            Self::new(key, self.direction.toggle())
        } else {
            Self::new(key, SortDirection::Ascending)
        }
    }
}

/// Lower-cased comparison key for one item
fn sort_key(media: &Media, key: SortKey, index: &MembershipIndex) -> String {
    match key {
        SortKey::Title => media.title.to_lowercase(),
        SortKey::Creator => media.creator.to_lowercase(),
        SortKey::Type => media.media_type.as_str().to_string(),
        SortKey::Status => media.status.as_str().to_lowercase(),
        SortKey::Collections => index.collections_text(media.id),
    }
}

/// Compare two already-derived keys in the given direction
pub fn compare(a: &str, b: &str, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    }
}

/// Case-insensitive substring match against title, creator, type, or
/// collections text. `needle` must already be trimmed and lower-cased.
fn matches_filter(media: &Media, needle: &str, index: &MembershipIndex) -> bool {
    needle.is_empty()
        || media.title.to_lowercase().contains(needle)
        || media.creator.to_lowercase().contains(needle)
        || media.media_type.as_str().contains(needle)
        || index.collections_text(media.id).contains(needle)
}

/// Filter then stably sort `media`.
///
/// Items that compare equal keep their relative input order in either
/// direction.
pub fn apply(
    media: Vec<Media>,
    index: &MembershipIndex,
    filter: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<Media> {
    let needle = filter.trim().to_lowercase();

    let mut keyed: Vec<(String, Media)> = media
        .into_iter()
        .filter(|m| matches_filter(m, &needle, index))
        .map(|m| (sort_key(&m, key, index), m))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare(a, b, direction));
    keyed.into_iter().map(|(_, m)| m).collect()
}

/// One row of the rendered catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    #[serde(flatten)]
    pub media: Media,
    pub collections: Vec<String>,
    pub collections_text: String,
}

/// Run [`apply`] and attach each item's collection names
pub fn entries(
    media: Vec<Media>,
    index: &MembershipIndex,
    filter: &str,
    sort: SortState,
) -> Vec<CatalogueEntry> {
    apply(media, index, filter, sort.key, sort.direction)
        .into_iter()
        .map(|media| CatalogueEntry {
            collections: index.collections_for(media.id).to_vec(),
            collections_text: index.collections_text(media.id),
            media,
        })
        .collect()
}
