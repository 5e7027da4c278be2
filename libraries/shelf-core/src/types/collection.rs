//! Collection domain types

use super::ids::{CollectionId, UserId};
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};

/// Named, user-owned grouping of media
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub date_added: String,
}

/// Collection as shown next to a media item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: CollectionId,
    pub name: String,
    pub description: Option<String>,
}

/// Raw collection creation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionInput {
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated data for creating a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCollection {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
}

impl CollectionInput {
    pub fn validate(self) -> Result<CreateCollection> {
        let user_id = self.user_id.filter(|id| *id > 0);
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        match (user_id, name) {
            (Some(user_id), Some(name)) => Ok(CreateCollection {
                user_id,
                name,
                description: normalize_description(self.description),
            }),
            (user_id, name) => {
                let mut invalid = Vec::new();
                if user_id.is_none() {
                    invalid.push("user_id");
                }
                if name.is_none() {
                    invalid.push("name");
                }
                Err(ShelfError::validation(invalid))
            }
        }
    }
}

/// Raw collection update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated collection update. An empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCollection {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl CollectionPatch {
    pub fn validate(self) -> Result<UpdateCollection> {
        if self.name.is_none() && self.description.is_none() {
            return Err(ShelfError::invalid_input("No fields to update"));
        }

        let name = match self.name {
            None => None,
            Some(name) if name.trim().is_empty() => {
                return Err(ShelfError::validation(["name"]));
            }
            Some(name) => Some(name.trim().to_string()),
        };

        Ok(UpdateCollection {
            name,
            description: self.description.map(|d| normalize_description(Some(d))),
        })
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
