use crate::{memberships, metadata, now_timestamp};
use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};

const SELECT_MEDIA: &str = r#"
    SELECT id, user_id, title, creator, year, type, status, publish_date, cover_url, date_added
    FROM media
"#;

/// Map a `media` row. Metadata is left unpopulated.
pub(crate) fn from_row(row: &SqliteRow) -> Result<Media> {
    let media_type: String = row.get("type");
    let status: String = row.get("status");
    let publish_date: Option<String> = row.get("publish_date");

    Ok(Media {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        creator: row.get("creator"),
        year: row.get("year"),
        media_type: MediaType::parse(&media_type)
            .ok_or_else(|| ShelfError::storage(format!("Invalid media type: {}", media_type)))?,
        status: MediaStatus::parse(&status)
            .ok_or_else(|| ShelfError::storage(format!("Invalid media status: {}", status)))?,
        publish_date: publish_date.as_deref().and_then(parse_stored_date),
        cover_url: row.get("cover_url"),
        date_added: row.get("date_added"),
        metadata: None,
    })
}

/// Get all media owned by a user
pub async fn get_all(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Media>> {
    let rows = sqlx::query(&format!("{SELECT_MEDIA} WHERE user_id = ? ORDER BY id"))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Get media by ID, without metadata
pub async fn get_by_id(pool: &SqlitePool, id: MediaId) -> Result<Option<Media>> {
    let row = sqlx::query(&format!("{SELECT_MEDIA} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get media by ID with its metadata set populated
pub async fn get_with_metadata(pool: &SqlitePool, id: MediaId) -> Result<Option<Media>> {
    let Some(mut media) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    media.metadata = Some(metadata::get_for_media(pool, id).await?);

    Ok(Some(media))
}

/// Owner of a media item, if it exists
pub(crate) async fn owner_of(conn: &mut SqliteConnection, id: MediaId) -> Result<Option<UserId>> {
    let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM media WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(owner)
}

/// Create a media item together with its metadata
pub async fn create(pool: &SqlitePool, media: CreateMedia) -> Result<Media> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO media (
            user_id, title, creator, year, type, status, publish_date, cover_url, date_added
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(media.user_id)
    .bind(&media.title)
    .bind(&media.creator)
    .bind(media.year)
    .bind(media.media_type.as_str())
    .bind(media.status.as_str())
    .bind(media.publish_date.map(format_date))
    .bind(&media.cover_url)
    .bind(now_timestamp())
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    metadata::insert_all(&mut tx, id, &media.metadata).await?;

    tx.commit().await?;

    tracing::info!(media_id = id, user_id = media.user_id, "Media created");

    get_with_metadata(pool, id)
        .await?
        .ok_or_else(|| ShelfError::storage("Failed to retrieve created media"))
}

/// Apply a partial update.
///
/// Only the provided columns are written. When `update.metadata` is
/// present it replaces the existing set in the same transaction.
pub async fn update(pool: &SqlitePool, id: MediaId, update: UpdateMedia) -> Result<Media> {
    let mut tx = pool.begin().await?;

    if update.has_field_changes() {
        let mut query_parts = Vec::new();

        if update.title.is_some() {
            query_parts.push("title = ?");
        }
        if update.creator.is_some() {
            query_parts.push("creator = ?");
        }
        if update.media_type.is_some() {
            query_parts.push("type = ?");
        }
        if update.status.is_some() {
            query_parts.push("status = ?");
        }
        if update.year.is_some() {
            query_parts.push("year = ?");
        }
        if update.publish_date.is_some() {
            query_parts.push("publish_date = ?");
        }
        if update.cover_url.is_some() {
            query_parts.push("cover_url = ?");
        }

        let query_str = format!("UPDATE media SET {} WHERE id = ?", query_parts.join(", "));
        let mut query = sqlx::query(&query_str);

        if let Some(title) = &update.title {
            query = query.bind(title);
        }
        if let Some(creator) = &update.creator {
            query = query.bind(creator);
        }
        if let Some(media_type) = update.media_type {
            query = query.bind(media_type.as_str());
        }
        if let Some(status) = update.status {
            query = query.bind(status.as_str());
        }
        if let Some(year) = update.year {
            query = query.bind(year);
        }
        if let Some(publish_date) = update.publish_date {
            query = query.bind(publish_date.map(format_date));
        }
        if let Some(cover_url) = &update.cover_url {
            query = query.bind(cover_url.clone());
        }

        let result = query.bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(ShelfError::not_found("Media", id));
        }
    } else if owner_of(&mut tx, id).await?.is_none() {
        return Err(ShelfError::not_found("Media", id));
    }

    if let Some(set) = &update.metadata {
        metadata::replace(&mut tx, id, set).await?;
    }

    tx.commit().await?;

    tracing::debug!(media_id = id, "Media updated");

    get_with_metadata(pool, id)
        .await?
        .ok_or_else(|| ShelfError::not_found("Media", id))
}

/// Delete a media item along with its metadata and memberships
pub async fn delete(pool: &SqlitePool, id: MediaId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let unlinked = memberships::remove_for_media(&mut tx, id).await?;
    metadata::delete_all(&mut tx, id).await?;

    let result = sqlx::query("DELETE FROM media WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Media", id));
    }

    tx.commit().await?;

    tracing::info!(media_id = id, unlinked, "Media deleted");

    Ok(())
}
