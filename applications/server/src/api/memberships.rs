/// Membership API routes
use crate::{
    error::Result,
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use shelf_core::types::{CollectionId, LinkInput, MediaId, ReplaceMemberships};

/// GET /api/collection-media/:media_id
/// Collections a media item belongs to
pub async fn collections_for_media(
    State(app_state): State<AppState>,
    ApiPath(media_id): ApiPath<MediaId>,
) -> Result<Json<Value>> {
    let collections = app_state
        .storage
        .list_collections_for_media(media_id)
        .await?;

    Ok(Json(json!({ "success": true, "collections": collections })))
}

/// GET /api/collection/:id/media
/// Media items in a collection
pub async fn media_for_collection(
    State(app_state): State<AppState>,
    ApiPath(collection_id): ApiPath<CollectionId>,
) -> Result<Json<Value>> {
    let media = app_state
        .storage
        .list_media_for_collection(collection_id)
        .await?;

    Ok(Json(json!({ "success": true, "media": media })))
}

/// POST /api/collection-media
/// Make the media item's collections exactly `collection_ids`
pub async fn replace_collections(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<ReplaceMemberships>,
) -> Result<Json<Value>> {
    let (user_id, media_id, collection_ids) = req.required_fields()?;

    let diff = app_state
        .storage
        .replace_collections_for_media(user_id, media_id, collection_ids)
        .await?;

    Ok(Json(json!({
        "success": true,
        "added": diff.added,
        "removed": diff.removed,
        "unchanged": diff.unchanged,
    })))
}

/// POST /api/collection
/// Link a single media item to a collection
pub async fn link_media(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LinkInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let link = req.validate()?;
    let linked = app_state.storage.link_media(link).await?;

    let status = if linked {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(json!({ "success": true, "linked": linked }))))
}

/// DELETE /api/collection/:id/media/:media_id
pub async fn unlink_media(
    State(app_state): State<AppState>,
    ApiPath((collection_id, media_id)): ApiPath<(CollectionId, MediaId)>,
) -> Result<Json<Value>> {
    app_state
        .storage
        .unlink_media(collection_id, media_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
