//! Media domain types
//!
//! `MediaInput` and `MediaPatch` are the raw shapes a caller submits;
//! `validate` turns them into `CreateMedia` / `UpdateMedia`, collecting every
//! invalid field before failing.

use super::ids::{MediaId, UserId};
use super::metadata::{MetadataInput, MetadataSet};
use crate::error::{Result, ShelfError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of catalogued item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Book,
    Movie,
    Tv,
    Game,
    Other,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Book => "book",
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Game => "game",
            MediaType::Other => "other",
        }
    }

    /// Parse from a string, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "book" => Some(MediaType::Book),
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            "game" => Some(MediaType::Game),
            "other" => Some(MediaType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress through an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl MediaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::NotStarted => "Not Started",
            MediaStatus::InProgress => "In Progress",
            MediaStatus::Completed => "Completed",
        }
    }

    /// Parse a status label, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "not started" => Some(MediaStatus::NotStarted),
            "in progress" => Some(MediaStatus::InProgress),
            "completed" => Some(MediaStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub user_id: UserId,
    pub title: String,
    pub creator: String,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub status: MediaStatus,
    pub publish_date: Option<NaiveDate>,
    pub cover_url: Option<String>,
    pub date_added: String,

    /// Metadata pairs (optional, populated on single-item reads)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<MetadataSet>,
}

/// Short form used when listing a collection's contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSummary {
    pub id: MediaId,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub status: MediaStatus,
}

impl From<&Media> for MediaSummary {
    fn from(media: &Media) -> Self {
        Self {
            id: media.id,
            title: media.title.clone(),
            media_type: media.media_type,
            status: media.status,
        }
    }
}

/// Raw media creation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInput {
    pub user_id: Option<UserId>,
    pub title: Option<String>,
    pub creator: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub publish_date: Option<String>,
    pub cover_url: Option<String>,
    pub metadata: Option<MetadataInput>,
}

/// Validated data for creating a media item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMedia {
    pub user_id: UserId,
    pub title: String,
    pub creator: String,
    pub media_type: MediaType,
    pub status: MediaStatus,
    pub year: Option<i32>,
    pub publish_date: Option<NaiveDate>,
    pub cover_url: Option<String>,
    pub metadata: MetadataSet,
}

impl MediaInput {
    /// Validate every field, reporting all failures at once
    pub fn validate(self) -> Result<CreateMedia> {
        let mut invalid = Vec::new();

        let user_id = self.user_id.filter(|id| *id > 0);
        if user_id.is_none() {
            invalid.push("user_id");
        }
        let title = required_text(self.title);
        if title.is_none() {
            invalid.push("title");
        }
        let creator = required_text(self.creator);
        if creator.is_none() {
            invalid.push("creator");
        }
        let media_type = self.media_type.as_deref().and_then(MediaType::parse);
        if media_type.is_none() {
            invalid.push("type");
        }
        let status = self.status.as_deref().and_then(MediaStatus::parse);
        if status.is_none() {
            invalid.push("status");
        }
        let publish_date = parse_date(self.publish_date).unwrap_or_else(|()| {
            invalid.push("publish_date");
            None
        });
        let cover_url = parse_url(self.cover_url).unwrap_or_else(|()| {
            invalid.push("cover_url");
            None
        });
        let metadata = match self.metadata.map(MetadataInput::into_set).transpose() {
            Ok(set) => set.unwrap_or_default(),
            Err(_) => {
                invalid.push("metadata");
                MetadataSet::new()
            }
        };

        match (user_id, title, creator, media_type, status) {
            (Some(user_id), Some(title), Some(creator), Some(media_type), Some(status))
                if invalid.is_empty() =>
            {
                Ok(CreateMedia {
                    user_id,
                    title,
                    creator,
                    media_type,
                    status,
                    year: self.year,
                    publish_date,
                    cover_url,
                    metadata,
                })
            }
            _ => Err(ShelfError::validation(invalid)),
        }
    }
}

/// Raw partial update request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPatch {
    pub title: Option<String>,
    pub creator: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub status: Option<String>,
    /// `null` clears the year; an absent field leaves it unchanged
    #[serde(default, deserialize_with = "present_or_null")]
    pub year: Option<Option<i32>>,
    pub publish_date: Option<String>,
    pub cover_url: Option<String>,
    pub metadata: Option<MetadataInput>,
}

/// Validated partial update.
///
/// For the nullable columns the outer `Option` means "provided" and the
/// inner one the new value, so an empty string (or `null` for `year`) in
/// the patch clears them.
/// `metadata`, when present, replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMedia {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub media_type: Option<MediaType>,
    pub status: Option<MediaStatus>,
    pub year: Option<Option<i32>>,
    pub publish_date: Option<Option<NaiveDate>>,
    pub cover_url: Option<Option<String>>,
    pub metadata: Option<MetadataSet>,
}

impl UpdateMedia {
    /// True when at least one column of the media row changes
    pub fn has_field_changes(&self) -> bool {
        self.title.is_some()
            || self.creator.is_some()
            || self.media_type.is_some()
            || self.status.is_some()
            || self.year.is_some()
            || self.publish_date.is_some()
            || self.cover_url.is_some()
    }
}

impl MediaPatch {
    /// Validate the provided fields, reporting all failures at once
    pub fn validate(self) -> Result<UpdateMedia> {
        let mut invalid = Vec::new();

        let title = self.title.map(|t| required_text(Some(t)));
        if matches!(title, Some(None)) {
            invalid.push("title");
        }
        let creator = self.creator.map(|c| required_text(Some(c)));
        if matches!(creator, Some(None)) {
            invalid.push("creator");
        }
        let media_type = self.media_type.map(|t| MediaType::parse(&t));
        if matches!(media_type, Some(None)) {
            invalid.push("type");
        }
        let status = self.status.map(|s| MediaStatus::parse(&s));
        if matches!(status, Some(None)) {
            invalid.push("status");
        }
        let publish_date = match self.publish_date {
            None => None,
            Some(raw) => match parse_date(Some(raw)) {
                Ok(date) => Some(date),
                Err(()) => {
                    invalid.push("publish_date");
                    None
                }
            },
        };
        let cover_url = match self.cover_url {
            None => None,
            Some(raw) => match parse_url(Some(raw)) {
                Ok(url) => Some(url),
                Err(()) => {
                    invalid.push("cover_url");
                    None
                }
            },
        };
        let metadata = match self.metadata.map(MetadataInput::into_set).transpose() {
            Ok(set) => set,
            Err(_) => {
                invalid.push("metadata");
                None
            }
        };

        if !invalid.is_empty() {
            return Err(ShelfError::validation(invalid));
        }

        Ok(UpdateMedia {
            title: title.flatten(),
            creator: creator.flatten(),
            media_type: media_type.flatten(),
            status: status.flatten(),
            year: self.year,
            publish_date,
            cover_url,
            metadata,
        })
    }
}

/// Format a publish date for storage
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored publish date
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn present_or_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<i32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(raw: Option<String>) -> std::result::Result<Option<NaiveDate>, ()> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ()),
    }
}

fn parse_url(raw: Option<String>) -> std::result::Result<Option<String>, ()> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => url::Url::parse(s)
            .map(|_| Some(s.to_string()))
            .map_err(|_| ()),
    }
}
