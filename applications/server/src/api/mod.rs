/// API route modules
pub mod catalogue;
pub mod collections;
pub mod health;
pub mod media;
pub mod memberships;

use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use shelf_core::{types::UserId, ShelfError};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

/// `?user_id=` query used by the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<UserId>,
}

pub(crate) fn require_user(query: &UserQuery) -> shelf_core::Result<UserId> {
    query
        .user_id
        .filter(|id| *id > 0)
        .ok_or_else(|| ShelfError::validation(["user_id"]))
}

/// Build the `/api` router with request tracing.
///
/// CORS is layered on by the caller since it depends on configuration.
pub fn router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        // Media
        .route("/media", post(media::create_media).get(media::list_media))
        .route(
            "/media/:id",
            get(media::get_media)
                .patch(media::update_media)
                .delete(media::delete_media),
        )
        .route(
            "/media/:id/metadata",
            get(media::get_metadata).post(media::add_metadata),
        )
        .route("/media/:id/metadata/:name", delete(media::remove_metadata))
        // Collections
        .route(
            "/collections",
            post(collections::create_collection).get(collections::list_collections),
        )
        .route(
            "/collections/:id",
            get(collections::get_collection).delete(collections::delete_collection),
        )
        .route(
            "/collection/:id",
            get(collections::get_collection).put(collections::update_collection),
        )
        // Memberships
        .route("/collection", post(memberships::link_media))
        .route("/collection/:id/media", get(memberships::media_for_collection))
        .route(
            "/collection/:id/media/:media_id",
            delete(memberships::unlink_media),
        )
        .route(
            "/collection-media",
            post(memberships::replace_collections),
        )
        .route(
            "/collection-media/:media_id",
            get(memberships::collections_for_media),
        )
        // Catalogue
        .route("/catalogue", get(catalogue::catalogue));

    Router::new()
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}
