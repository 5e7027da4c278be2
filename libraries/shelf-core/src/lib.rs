//! Shelf Core
//!
//! Platform-agnostic domain types, validation, error handling, and the
//! catalogue query engine for the shelf media catalogue.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Media`, `Collection`, `Membership`, `MetadataSet`
//! - **Storage Trait**: `StorageContext`, implemented by `shelf-storage`
//! - **Catalogue Engine**: pure filter + sort over media joined with memberships
//! - **Error Handling**: unified `ShelfError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelf_core::catalogue::{self, MembershipIndex, SortKey, SortDirection};
//! use shelf_core::types::MediaInput;
//!
//! let input = MediaInput {
//!     user_id: Some(1),
//!     title: Some("Dune".into()),
//!     creator: Some("Frank Herbert".into()),
//!     media_type: Some("book".into()),
//!     status: Some("In Progress".into()),
//!     ..Default::default()
//! };
//! let media = input.validate().expect("valid input");
//! assert_eq!(media.title, "Dune");
//!
//! let index = MembershipIndex::new();
//! assert_eq!(index.collections_text(42), catalogue::DRAFT);
//! let sorted = catalogue::apply(Vec::new(), &index, "", SortKey::Title, SortDirection::Ascending);
//! assert!(sorted.is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod catalogue;
pub mod error;
pub mod storage;
pub mod types;

pub use catalogue::{CatalogueEntry, MembershipIndex, SortDirection, SortKey, SortState};
pub use error::{Result, ShelfError};
pub use storage::StorageContext;

pub use types::{
    Collection, CollectionId, CollectionInput, CollectionPatch, CollectionSummary,
    CreateCollection, CreateMedia, LinkInput, LinkMedia, Media, MediaId, MediaInput, MediaPatch,
    MediaStatus, MediaSummary, MediaType, Membership, MembershipDiff, MetadataInput, MetadataPair,
    MetadataSet, ReplaceMemberships, UpdateCollection, UpdateMedia, UserId,
};
