use crate::media;
use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{Row, SqliteConnection, SqliteExecutor, SqlitePool};

/// Get a media item's metadata in insertion order
pub async fn get_for_media<'e>(
    executor: impl SqliteExecutor<'e>,
    media_id: MediaId,
) -> Result<MetadataSet> {
    let rows = sqlx::query("SELECT name, value FROM media_metadata WHERE media_id = ? ORDER BY rowid")
        .bind(media_id)
        .fetch_all(executor)
        .await?;

    let mut set = MetadataSet::new();
    for row in rows {
        set.insert(MetadataPair::new(
            row.get::<String, _>("name"),
            row.get::<String, _>("value"),
        ));
    }

    Ok(set)
}

pub(crate) async fn insert_all(
    conn: &mut SqliteConnection,
    media_id: MediaId,
    set: &MetadataSet,
) -> Result<()> {
    for pair in set {
        sqlx::query("INSERT INTO media_metadata (media_id, name, value) VALUES (?, ?, ?)")
            .bind(media_id)
            .bind(&pair.name)
            .bind(&pair.value)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

pub(crate) async fn delete_all(conn: &mut SqliteConnection, media_id: MediaId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM media_metadata WHERE media_id = ?")
        .bind(media_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Replace the whole metadata set (no merge)
pub(crate) async fn replace(
    conn: &mut SqliteConnection,
    media_id: MediaId,
    set: &MetadataSet,
) -> Result<()> {
    delete_all(&mut *conn, media_id).await?;
    insert_all(conn, media_id, set).await
}

/// Add one pair to a media item.
///
/// Returns `false` without changing anything when the name already exists.
pub async fn add(pool: &SqlitePool, media_id: MediaId, pair: MetadataPair) -> Result<bool> {
    let name = pair.name.trim();
    if name.is_empty() {
        return Err(ShelfError::validation(["name"]));
    }

    let mut tx = pool.begin().await?;

    if media::owner_of(&mut tx, media_id).await?.is_none() {
        return Err(ShelfError::not_found("Media", media_id));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO media_metadata (media_id, name, value)
        VALUES (?, ?, ?)
        ON CONFLICT(media_id, name) DO NOTHING
        "#,
    )
    .bind(media_id)
    .bind(name)
    .bind(&pair.value)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let added = result.rows_affected() > 0;
    if !added {
        tracing::debug!(media_id, name, "Metadata name already present, ignoring");
    }

    Ok(added)
}

/// Remove a metadata pair by name
pub async fn remove(pool: &SqlitePool, media_id: MediaId, name: &str) -> Result<()> {
    let name = name.trim();
    let mut tx = pool.begin().await?;

    if media::owner_of(&mut tx, media_id).await?.is_none() {
        return Err(ShelfError::not_found("Media", media_id));
    }

    let result = sqlx::query("DELETE FROM media_metadata WHERE media_id = ? AND name = ?")
        .bind(media_id)
        .bind(name)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Metadata", name));
    }

    tx.commit().await?;

    Ok(())
}
