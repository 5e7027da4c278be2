/// API integration tests
/// Tests complete HTTP request/response cycles with a real database
mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_get_media() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/media",
            json!({
                "user_id": 1,
                "title": "Dune",
                "creator": "Frank Herbert",
                "type": "book",
                "status": "In Progress",
                "year": 1965,
                "publish_date": "1965-08-01",
                "cover_url": "https://example.com/dune.jpg",
                "metadata": [
                    {"name": "isbn", "value": "978-0441013593"},
                    {"name": "pages", "value": "412"}
                ]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["date_added"].is_string());
    let id = body["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/media/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    let media = &body["media"];
    assert_eq!(media["title"], "Dune");
    assert_eq!(media["type"], "book");
    assert_eq!(media["status"], "In Progress");
    assert_eq!(media["year"], 1965);
    assert_eq!(media["publish_date"], "1965-08-01");
    assert_eq!(media["metadata"][0]["name"], "isbn");
    assert_eq!(media["metadata"][1]["value"], "412");
}

#[tokio::test]
async fn test_create_media_accepts_metadata_object() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/media",
            json!({
                "user_id": 1,
                "title": "Alien",
                "creator": "Ridley Scott",
                "type": "movie",
                "status": "Completed",
                "metadata": {"runtime": "117"}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = app.get(&format!("/api/media/{id}/metadata")).await;

    assert_eq!(body["metadata"], json!([{"name": "runtime", "value": "117"}]));
}

#[tokio::test]
async fn test_create_media_stringifies_scalar_metadata() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/media",
            json!({
                "user_id": 1,
                "title": "Dune",
                "creator": "Frank Herbert",
                "type": "book",
                "status": "Not Started",
                "cover_url": "https://Example.com",
                "metadata": {"pages": 412, "notes": null}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = app.get(&format!("/api/media/{id}")).await;

    assert_eq!(body["media"]["cover_url"], "https://Example.com");
    assert_eq!(body["media"]["metadata"], json!([{"name": "pages", "value": "412"}]));
}

#[tokio::test]
async fn test_create_media_lists_every_invalid_field() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/media",
            json!({"user_id": 1, "title": "", "type": "vinyl", "status": "Not Started"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing or invalid fields: title, creator, type");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/media", json!("not an object")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_media_requires_user_id() {
    let app = TestApp::new().await;
    app.create_media(1, "Dune", "Frank Herbert", "book").await;
    app.create_media(2, "Other", "Someone", "game").await;

    let (status, body) = app.get("/api/media?user_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["media"].as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/media").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid fields: user_id");
}

#[tokio::test]
async fn test_patch_media() {
    let app = TestApp::new().await;
    let id = app.create_media(1, "Dune", "Frank Herbert", "book").await;
    app.post(
        &format!("/api/media/{id}/metadata"),
        json!({"name": "isbn", "value": "1"}),
    )
    .await;

    let (status, body) = app
        .patch(
            &format!("/api/media/{id}"),
            json!({"status": "Completed", "metadata": [{"name": "edition", "value": "first"}]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let media = &body["media"];
    assert_eq!(media["status"], "Completed");
    assert_eq!(media["title"], "Dune");
    assert_eq!(media["metadata"], json!([{"name": "edition", "value": "first"}]));
}

#[tokio::test]
async fn test_patch_missing_media_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.patch("/api/media/999", json!({"title": "x"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_metadata_add_and_remove() {
    let app = TestApp::new().await;
    let id = app.create_media(1, "Dune", "Frank Herbert", "book").await;
    let uri = format!("/api/media/{id}/metadata");

    let (_, first) = app.post(&uri, json!({"name": "isbn", "value": "1"})).await;
    let (_, second) = app.post(&uri, json!({"name": "isbn", "value": "2"})).await;
    assert_eq!(first["added"], true);
    assert_eq!(second["added"], false);

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["metadata"], json!([{"name": "isbn", "value": "1"}]));

    let (status, _) = app.delete(&format!("{uri}/isbn")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&format!("{uri}/isbn")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_media() {
    let app = TestApp::new().await;
    let id = app.create_media(1, "Dune", "Frank Herbert", "book").await;

    let (status, _) = app.delete(&format!("/api/media/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/media/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/media/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_collection_crud() {
    let app = TestApp::new().await;
    let id = app.create_collection(1, "Favourites").await;

    let (status, body) = app.get(&format!("/api/collections/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"]["name"], "Favourites");

    let (status, body) = app
        .put(
            &format!("/api/collection/{id}"),
            json!({"name": "Best", "description": "Top picks"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"]["description"], "Top picks");

    let (_, body) = app.get(&format!("/api/collection/{id}")).await;
    assert_eq!(body["collection"]["name"], "Best");

    let (_, body) = app.get("/api/collections?user_id=1").await;
    assert_eq!(body["collections"].as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&format!("/api/collections/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/api/collections/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_collection_with_no_fields() {
    let app = TestApp::new().await;
    let id = app.create_collection(1, "Favourites").await;

    let (status, body) = app.put(&format!("/api/collection/{id}"), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No fields to update");
}

#[tokio::test]
async fn test_create_collection_requires_name() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/collections", json!({"user_id": 1, "name": "  "}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid fields: name");
}

#[tokio::test]
async fn test_replace_memberships() {
    let app = TestApp::new().await;
    let media_id = app.create_media(1, "Dune", "Frank Herbert", "book").await;
    let c1 = app.create_collection(1, "One").await;
    let c2 = app.create_collection(1, "Two").await;
    let c3 = app.create_collection(1, "Three").await;

    let (status, _) = app
        .post(
            "/api/collection-media",
            json!({"user_id": 1, "media_id": media_id, "collection_ids": [c1, c2]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/collection-media",
            json!({"user_id": 1, "media_id": media_id, "collection_ids": [c2, c3]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["added"], json!([c3]));
    assert_eq!(body["removed"], json!([c1]));
    assert_eq!(body["unchanged"], json!([c2]));

    let (_, body) = app.get(&format!("/api/collection-media/{media_id}")).await;
    let ids: Vec<i64> = body["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![c2, c3]);

    let (_, body) = app.get(&format!("/api/collection/{c3}/media")).await;
    assert_eq!(body["media"][0]["title"], "Dune");
    assert_eq!(body["media"][0]["type"], "book");
}

#[tokio::test]
async fn test_replace_memberships_rejects_foreign_collection() {
    let app = TestApp::new().await;
    let media_id = app.create_media(1, "Dune", "Frank Herbert", "book").await;
    let theirs = app.create_collection(2, "Theirs").await;

    let (status, body) = app
        .post(
            "/api/collection-media",
            json!({"user_id": 1, "media_id": media_id, "collection_ids": [theirs]}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_replace_memberships_requires_ids() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/collection-media", json!({"collection_ids": [1]}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid fields: user_id, media_id");
}

#[tokio::test]
async fn test_replace_memberships_requires_collection_ids() {
    let app = TestApp::new().await;
    let media_id = app.create_media(1, "Dune", "Frank Herbert", "book").await;
    let c = app.create_collection(1, "One").await;
    app.post(
        "/api/collection-media",
        json!({"user_id": 1, "media_id": media_id, "collection_ids": [c]}),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/collection-media",
            json!({"user_id": 1, "media_id": media_id}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid fields: collection_ids");

    let (_, body) = app.get(&format!("/api/collection-media/{media_id}")).await;
    assert_eq!(body["collections"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_single_link_and_unlink() {
    let app = TestApp::new().await;
    let media_id = app.create_media(1, "Dune", "Frank Herbert", "book").await;
    let c = app.create_collection(1, "One").await;
    let link = json!({"user_id": 1, "collection_id": c, "media_id": media_id, "rating": 5});

    let (status, body) = app.post("/api/collection", link.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["linked"], true);

    let (status, body) = app.post("/api/collection", link).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["linked"], false);

    let (status, _) = app
        .delete(&format!("/api/collection/{c}/media/{media_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/collection-media/{media_id}")).await;
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn test_single_link_rejects_bad_rating() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/collection",
            json!({"user_id": 1, "collection_id": 1, "media_id": 1, "rating": 9}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid fields: rating");
}

#[tokio::test]
async fn test_deleting_collection_unlinks_media() {
    let app = TestApp::new().await;
    let a = app.create_media(1, "A", "X", "book").await;
    let b = app.create_media(1, "B", "Y", "book").await;
    let c = app.create_collection(1, "Doomed").await;
    for media_id in [a, b] {
        app.post(
            "/api/collection-media",
            json!({"user_id": 1, "media_id": media_id, "collection_ids": [c]}),
        )
        .await;
    }

    app.delete(&format!("/api/collections/{c}")).await;

    for media_id in [a, b] {
        let (_, body) = app.get(&format!("/api/collection-media/{media_id}")).await;
        assert_eq!(body["collections"], json!([]));
    }
}

#[tokio::test]
async fn test_catalogue_filter_and_sort() {
    let app = TestApp::new().await;
    let alpha = app.create_collection(1, "Alpha").await;
    let beta = app.create_collection(1, "Beta").await;
    let first = app.create_media(1, "First", "A", "book").await;
    app.create_media(1, "Second", "B", "movie").await;
    let third = app.create_media(1, "Third", "C", "game").await;
    app.post(
        "/api/collection-media",
        json!({"user_id": 1, "media_id": first, "collection_ids": [alpha]}),
    )
    .await;
    app.post(
        "/api/collection-media",
        json!({"user_id": 1, "media_id": third, "collection_ids": [beta]}),
    )
    .await;

    let (status, body) = app
        .get("/api/catalogue?user_id=1&sort=collections&direction=asc")
        .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["media"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Third", "Second"]);
    assert_eq!(body["media"][2]["collections_text"], "draft");
    assert_eq!(body["sort"], json!({"key": "collections", "direction": "asc"}));

    let (_, body) = app.get("/api/catalogue?user_id=1&filter=draft").await;
    assert_eq!(body["media"].as_array().unwrap().len(), 1);
    assert_eq!(body["media"][0]["title"], "Second");

    let (status, body) = app.get("/api/catalogue?user_id=1&sort=rating").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing or invalid fields: sort");
}
