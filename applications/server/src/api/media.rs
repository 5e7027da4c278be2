/// Media API routes
use super::{require_user, UserQuery};
use crate::{
    error::Result,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use shelf_core::{
    types::{MediaId, MediaInput, MediaPatch, MetadataPair},
    ShelfError,
};

#[derive(Debug, Deserialize)]
pub struct AddMetadataRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// POST /api/media
/// Create a media item with optional metadata
pub async fn create_media(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<MediaInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let create = req.validate()?;
    let media = app_state.storage.create_media(create).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": media.id,
            "date_added": media.date_added,
        })),
    ))
}

/// GET /api/media?user_id=
/// List a user's media
pub async fn list_media(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<Value>> {
    let user_id = require_user(&query)?;
    let media = app_state.storage.list_media(user_id).await?;

    Ok(Json(json!({ "success": true, "media": media })))
}

/// GET /api/media/:id
/// Get a media item with its metadata
pub async fn get_media(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MediaId>,
) -> Result<Json<Value>> {
    let media = app_state.storage.get_media(id).await?;

    Ok(Json(json!({ "success": true, "media": media })))
}

/// PATCH /api/media/:id
/// Partial update; supplied metadata replaces the existing set
pub async fn update_media(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MediaId>,
    ApiJson(req): ApiJson<MediaPatch>,
) -> Result<Json<Value>> {
    let update = req.validate()?;
    let media = app_state.storage.update_media(id, update).await?;

    Ok(Json(json!({ "success": true, "media": media })))
}

/// DELETE /api/media/:id
pub async fn delete_media(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MediaId>,
) -> Result<Json<Value>> {
    app_state.storage.delete_media(id).await?;

    Ok(Json(json!({ "success": true, "message": "Media deleted" })))
}

/// GET /api/media/:id/metadata
pub async fn get_metadata(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MediaId>,
) -> Result<Json<Value>> {
    let metadata = app_state.storage.get_media_metadata(id).await?;

    Ok(Json(json!({ "success": true, "metadata": metadata })))
}

/// POST /api/media/:id/metadata
/// Add one pair; an existing name is left as it is
pub async fn add_metadata(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<MediaId>,
    ApiJson(req): ApiJson<AddMetadataRequest>,
) -> Result<Json<Value>> {
    let name = req.name.filter(|n| !n.trim().is_empty());
    let pair = match (name, req.value) {
        (Some(name), Some(value)) => MetadataPair::new(name.trim(), value),
        (name, value) => {
            let mut invalid = Vec::new();
            if name.is_none() {
                invalid.push("name");
            }
            if value.is_none() {
                invalid.push("value");
            }
            return Err(ShelfError::validation(invalid).into());
        }
    };

    let added = app_state.storage.add_media_metadata(id, pair).await?;

    Ok(Json(json!({ "success": true, "added": added })))
}

/// DELETE /api/media/:id/metadata/:name
pub async fn remove_metadata(
    State(app_state): State<AppState>,
    ApiPath((id, name)): ApiPath<(MediaId, String)>,
) -> Result<Json<Value>> {
    app_state.storage.remove_media_metadata(id, &name).await?;

    Ok(Json(json!({ "success": true })))
}
