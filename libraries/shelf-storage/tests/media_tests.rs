//! Integration tests for the media and metadata slices


use chrono::NaiveDate;
use shelf_core::{types::*, ShelfError};
use shelf_storage::{media, metadata};
use test_helpers::*;

fn pairs(items: &[(&str, &str)]) -> MetadataSet {
    MetadataSet::from_pairs(items.iter().map(|(n, v)| MetadataPair::new(*n, *v))).unwrap()
}

#[tokio::test]
async fn test_create_and_get_media() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut input = new_media(1, "Dune", "Frank Herbert", MediaType::Book);
    input.year = Some(1965);
    input.publish_date = NaiveDate::from_ymd_opt(1965, 8, 1);
    input.cover_url = Some("https://example.com/dune.jpg".to_string());
    input.metadata = pairs(&[("isbn", "978-0441013593"), ("pages", "412")]);

    let created = media::create(pool, input).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.title, "Dune");
    assert_eq!(created.year, Some(1965));
    assert!(!created.date_added.is_empty());

    let fetched = media::get_with_metadata(pool, created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.creator, "Frank Herbert");
    assert_eq!(fetched.media_type, MediaType::Book);
    assert_eq!(fetched.status, MediaStatus::NotStarted);
    assert_eq!(fetched.publish_date, NaiveDate::from_ymd_opt(1965, 8, 1));
    assert_eq!(fetched.cover_url.as_deref(), Some("https://example.com/dune.jpg"));

    let meta = fetched.metadata.unwrap();
    let names: Vec<&str> = meta.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["isbn", "pages"]);
    assert_eq!(meta.get("pages"), Some("412"));
}

#[tokio::test]
async fn test_get_missing_media_returns_none() {
    let test_db = TestDb::new().await;

    let result = media::get_by_id(test_db.pool(), 999).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_get_all_is_scoped_to_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_media(pool, 1, "A").await;
    create_test_media(pool, 1, "B").await;
    create_test_media(pool, 2, "C").await;

    let user1 = media::get_all(pool, 1).await.unwrap();
    let user3 = media::get_all(pool, 3).await.unwrap();

    assert_eq!(user1.len(), 2);
    assert!(user1.iter().all(|m| m.user_id == 1));
    assert!(user3.is_empty());
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut input = new_media(1, "Dune", "Frank Herbert", MediaType::Book);
    input.metadata = pairs(&[("isbn", "1")]);
    let created = media::create(pool, input).await.unwrap();

    let updated = media::update(
        pool,
        created.id,
        UpdateMedia {
            status: Some(MediaStatus::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.status, MediaStatus::Completed);
    assert_eq!(updated.title, "Dune");
    assert_eq!(updated.creator, "Frank Herbert");
    assert_eq!(updated.metadata.unwrap().get("isbn"), Some("1"));
}

#[tokio::test]
async fn test_update_metadata_replaces_whole_set() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut input = new_media(1, "Dune", "Frank Herbert", MediaType::Book);
    input.metadata = pairs(&[("isbn", "1"), ("pages", "412")]);
    let created = media::create(pool, input).await.unwrap();

    let updated = media::update(
        pool,
        created.id,
        UpdateMedia {
            metadata: Some(pairs(&[("edition", "first")])),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let meta = updated.metadata.unwrap();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta.get("edition"), Some("first"));
    assert!(!meta.contains("isbn"));
}

#[tokio::test]
async fn test_update_can_clear_nullable_fields() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut input = new_media(1, "Dune", "Frank Herbert", MediaType::Book);
    input.cover_url = Some("https://example.com/dune.jpg".to_string());
    input.year = Some(1965);
    let created = media::create(pool, input).await.unwrap();

    let updated = media::update(
        pool,
        created.id,
        UpdateMedia {
            cover_url: Some(None),
            year: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(updated.cover_url.is_none());
    assert!(updated.year.is_none());
}

#[tokio::test]
async fn test_update_missing_media_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let with_fields = media::update(
        pool,
        42,
        UpdateMedia {
            title: Some("x".to_string()),
            ..Default::default()
        },
    )
    .await;
    let metadata_only = media::update(
        pool,
        42,
        UpdateMedia {
            metadata: Some(MetadataSet::new()),
            ..Default::default()
        },
    )
    .await;

    assert!(matches!(with_fields, Err(ShelfError::NotFound { .. })));
    assert!(matches!(metadata_only, Err(ShelfError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_removes_metadata_and_links() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut input = new_media(1, "Dune", "Frank Herbert", MediaType::Book);
    input.metadata = pairs(&[("isbn", "1")]);
    let media_id = media::create(pool, input).await.unwrap().id;
    let collection_id = create_test_collection(pool, 1, "Sci-Fi").await;
    shelf_storage::memberships::replace_for_media(pool, 1, media_id, &[collection_id])
        .await
        .unwrap();

    media::delete(pool, media_id).await.unwrap();

    assert!(media::get_by_id(pool, media_id).await.unwrap().is_none());
    assert!(metadata::get_for_media(pool, media_id).await.unwrap().is_empty());
    assert_eq!(count_links(pool).await, 0);

    let again = media::delete(pool, media_id).await;
    assert!(matches!(again, Err(ShelfError::NotFound { .. })));
}

#[tokio::test]
async fn test_add_metadata_ignores_duplicate_name() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let media_id = create_test_media(pool, 1, "Dune").await;

    let first = metadata::add(pool, media_id, MetadataPair::new("isbn", "1"))
        .await
        .unwrap();
    let second = metadata::add(pool, media_id, MetadataPair::new("isbn", "2"))
        .await
        .unwrap();

    assert!(first);
    assert!(!second);

    let set = metadata::get_for_media(pool, media_id).await.unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.get("isbn"), Some("1"));
}

#[tokio::test]
async fn test_add_metadata_to_missing_media() {
    let test_db = TestDb::new().await;

    let result = metadata::add(test_db.pool(), 7, MetadataPair::new("isbn", "1")).await;

    assert!(matches!(result, Err(ShelfError::NotFound { .. })));
}

#[tokio::test]
async fn test_remove_metadata() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let media_id = create_test_media(pool, 1, "Dune").await;
    metadata::add(pool, media_id, MetadataPair::new("isbn", "1"))
        .await
        .unwrap();

    metadata::remove(pool, media_id, "isbn").await.unwrap();
    let missing = metadata::remove(pool, media_id, "isbn").await;

    assert!(metadata::get_for_media(pool, media_id).await.unwrap().is_empty());
    assert!(matches!(missing, Err(ShelfError::NotFound { .. })));
}

#[tokio::test]
async fn test_remove_metadata_trims_name() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let media_id = create_test_media(pool, 1, "Dune").await;
    metadata::add(pool, media_id, MetadataPair::new(" isbn", "1"))
        .await
        .unwrap();

    metadata::remove(pool, media_id, " isbn ").await.unwrap();

    assert!(metadata::get_for_media(pool, media_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cover_url_round_trips_unchanged() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let input = MediaInput {
        user_id: Some(1),
        title: Some("Dune".into()),
        creator: Some("Frank Herbert".into()),
        media_type: Some("book".into()),
        status: Some("Not Started".into()),
        cover_url: Some("https://Example.com".into()),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let created = media::create(pool, input).await.unwrap();
    let fetched = media::get_by_id(pool, created.id).await.unwrap().unwrap();

    assert_eq!(fetched.cover_url.as_deref(), Some("https://Example.com"));
}
