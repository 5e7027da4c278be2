/// Catalogue view API route
use crate::{error::Result, extract::ApiQuery, state::AppState};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use shelf_core::{
    catalogue::{SortDirection, SortKey, SortState},
    types::UserId,
    ShelfError,
};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogueQuery {
    pub user_id: Option<UserId>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl CatalogueQuery {
    /// Resolve the sort state, defaulting to title ascending
    fn sort_state(&self) -> shelf_core::Result<SortState> {
        let mut invalid = Vec::new();

        let key = match self.sort.as_deref() {
            None | Some("") => Some(SortKey::default()),
            Some(raw) => SortKey::parse(raw),
        };
        if key.is_none() {
            invalid.push("sort");
        }

        let direction = match self.direction.as_deref() {
            None | Some("") => Some(SortDirection::default()),
            Some(raw) => SortDirection::parse(raw),
        };
        if direction.is_none() {
            invalid.push("direction");
        }

        match (key, direction) {
            (Some(key), Some(direction)) => Ok(SortState::new(key, direction)),
            _ => Err(ShelfError::validation(invalid)),
        }
    }
}

/// GET /api/catalogue?user_id=&filter=&sort=&direction=
/// Filtered and sorted catalogue rows for a user
pub async fn catalogue(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<CatalogueQuery>,
) -> Result<Json<Value>> {
    let user_id = query
        .user_id
        .filter(|id| *id > 0)
        .ok_or_else(|| ShelfError::validation(["user_id"]))?;
    let sort = query.sort_state()?;
    let filter = query.filter.as_deref().unwrap_or_default();

    let entries = app_state
        .storage
        .query_catalogue(user_id, filter, sort)
        .await?;

    tracing::debug!(user_id, rows = entries.len(), "Catalogue queried");

    Ok(Json(json!({
        "success": true,
        "sort": sort,
        "media": entries,
    })))
}
