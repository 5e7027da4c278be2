//! Identifier types
//!
//! All entities use `SQLite` rowids.

/// Owner of media and collections, supplied by the identity provider
pub type UserId = i64;

/// Media item identifier
pub type MediaId = i64;

/// Collection identifier
pub type CollectionId = i64;
