/// Collections API routes
use super::{require_user, UserQuery};
use crate::{
    error::Result,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use shelf_core::types::{CollectionId, CollectionInput, CollectionPatch};

/// POST /api/collections
pub async fn create_collection(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CollectionInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let create = req.validate()?;
    let collection = app_state.storage.create_collection(create).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Collection added",
            "id": collection.id,
        })),
    ))
}

/// GET /api/collections?user_id=
pub async fn list_collections(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<Value>> {
    let user_id = require_user(&query)?;
    let collections = app_state.storage.list_collections(user_id).await?;

    Ok(Json(json!({ "success": true, "collections": collections })))
}

/// GET /api/collections/:id (also served at /api/collection/:id)
pub async fn get_collection(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<CollectionId>,
) -> Result<Json<Value>> {
    let collection = app_state.storage.get_collection(id).await?;

    Ok(Json(json!({ "success": true, "collection": collection })))
}

/// PUT /api/collection/:id
/// Update name and/or description
pub async fn update_collection(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<CollectionId>,
    ApiJson(req): ApiJson<CollectionPatch>,
) -> Result<Json<Value>> {
    let update = req.validate()?;
    let collection = app_state.storage.update_collection(id, update).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Collection updated",
        "collection": collection,
    })))
}

/// DELETE /api/collections/:id
/// Delete a collection and its memberships
pub async fn delete_collection(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<CollectionId>,
) -> Result<Json<Value>> {
    app_state.storage.delete_collection(id).await?;

    Ok(Json(json!({ "success": true, "message": "Collection deleted" })))
}
