use crate::{collections, media, now_timestamp};
use shelf_core::{catalogue::MembershipIndex, error::Result, types::*, ShelfError};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Get the raw membership rows for a media item
pub async fn get_by_media(pool: &SqlitePool, media_id: MediaId) -> Result<Vec<Membership>> {
    let rows = sqlx::query(
        r#"
        SELECT collection_id, media_id, user_id, date_added, rating
        FROM collection_media
        WHERE media_id = ?
        ORDER BY collection_id
        "#,
    )
    .bind(media_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Membership {
            collection_id: row.get("collection_id"),
            media_id: row.get("media_id"),
            user_id: row.get("user_id"),
            date_added: row.get("date_added"),
            rating: row.get("rating"),
        })
        .collect())
}

async fn current_collection_ids(
    conn: &mut SqliteConnection,
    media_id: MediaId,
) -> Result<Vec<CollectionId>> {
    let ids = sqlx::query_scalar::<_, CollectionId>(
        "SELECT collection_id FROM collection_media WHERE media_id = ?",
    )
    .bind(media_id)
    .fetch_all(conn)
    .await?;

    Ok(ids)
}

/// Resolve the media owner and check it matches the requesting user
async fn check_media_owner(
    conn: &mut SqliteConnection,
    user_id: UserId,
    media_id: MediaId,
) -> Result<()> {
    match media::owner_of(conn, media_id).await? {
        None => Err(ShelfError::not_found("Media", media_id)),
        Some(owner) if owner != user_id => Err(ShelfError::referential(format!(
            "Media {} does not belong to user {}",
            media_id, user_id
        ))),
        Some(_) => Ok(()),
    }
}

/// Every collection must exist and belong to `user_id`
async fn check_collections_owned(
    conn: &mut SqliteConnection,
    user_id: UserId,
    collection_ids: &[CollectionId],
) -> Result<()> {
    let mut offending = Vec::new();
    for &id in collection_ids {
        if collections::owner_of(&mut *conn, id).await? != Some(user_id) {
            offending.push(id.to_string());
        }
    }

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ShelfError::referential(format!(
            "Collections missing or not owned by user {}: {}",
            user_id,
            offending.join(", ")
        )))
    }
}

/// Make a media item's memberships exactly `collection_ids`.
///
/// Links that survive keep their `date_added` and rating. Either every
/// change is applied or none is.
pub async fn replace_for_media(
    pool: &SqlitePool,
    user_id: UserId,
    media_id: MediaId,
    collection_ids: &[CollectionId],
) -> Result<MembershipDiff> {
    let mut tx = pool.begin().await?;

    check_media_owner(&mut tx, user_id, media_id).await?;

    let current = current_collection_ids(&mut tx, media_id).await?;
    let diff = MembershipDiff::between(&current, collection_ids);

    check_collections_owned(&mut tx, user_id, &diff.added).await?;

    for collection_id in &diff.removed {
        sqlx::query("DELETE FROM collection_media WHERE collection_id = ? AND media_id = ?")
            .bind(collection_id)
            .bind(media_id)
            .execute(&mut *tx)
            .await?;
    }

    let date_added = now_timestamp();
    for collection_id in &diff.added {
        sqlx::query(
            r#"
            INSERT INTO collection_media (collection_id, media_id, user_id, date_added, rating)
            VALUES (?, ?, ?, ?, NULL)
            "#,
        )
        .bind(collection_id)
        .bind(media_id)
        .bind(user_id)
        .bind(&date_added)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        media_id,
        added = diff.added.len(),
        removed = diff.removed.len(),
        "Memberships replaced"
    );

    Ok(diff)
}

/// Link one media item to one collection.
///
/// Returns `false` when the pair is already linked; the existing link is
/// left untouched.
pub async fn link(pool: &SqlitePool, link: LinkMedia) -> Result<bool> {
    let mut tx = pool.begin().await?;

    check_media_owner(&mut tx, link.user_id, link.media_id).await?;
    check_collections_owned(&mut tx, link.user_id, &[link.collection_id]).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO collection_media (collection_id, media_id, user_id, date_added, rating)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(collection_id, media_id) DO NOTHING
        "#,
    )
    .bind(link.collection_id)
    .bind(link.media_id)
    .bind(link.user_id)
    .bind(now_timestamp())
    .bind(link.rating)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a single link
pub async fn unlink(pool: &SqlitePool, collection_id: CollectionId, media_id: MediaId) -> Result<()> {
    let result = sqlx::query("DELETE FROM collection_media WHERE collection_id = ? AND media_id = ?")
        .bind(collection_id)
        .bind(media_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found(
            "Membership",
            format!("{}/{}", collection_id, media_id),
        ));
    }

    Ok(())
}

/// Collections a media item belongs to
pub async fn get_collections_for_media(
    pool: &SqlitePool,
    media_id: MediaId,
) -> Result<Vec<CollectionSummary>> {
    let mut conn = pool.acquire().await?;

    if media::owner_of(&mut conn, media_id).await?.is_none() {
        return Err(ShelfError::not_found("Media", media_id));
    }

    let rows = sqlx::query(
        r#"
        SELECT c.id, c.name, c.description
        FROM collections c
        INNER JOIN collection_media cm ON c.id = cm.collection_id
        WHERE cm.media_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(media_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CollectionSummary {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
        })
        .collect())
}

/// Media items in a collection
pub async fn get_media_for_collection(
    pool: &SqlitePool,
    collection_id: CollectionId,
) -> Result<Vec<MediaSummary>> {
    let mut conn = pool.acquire().await?;

    if collections::owner_of(&mut conn, collection_id).await?.is_none() {
        return Err(ShelfError::not_found("Collection", collection_id));
    }

    let rows = sqlx::query(
        r#"
        SELECT m.id, m.title, m.type, m.status
        FROM media m
        INNER JOIN collection_media cm ON m.id = cm.media_id
        WHERE cm.collection_id = ?
        ORDER BY m.id
        "#,
    )
    .bind(collection_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter()
        .map(|row| {
            let media_type: String = row.get("type");
            let status: String = row.get("status");
            Ok(MediaSummary {
                id: row.get("id"),
                title: row.get("title"),
                media_type: MediaType::parse(&media_type).ok_or_else(|| {
                    ShelfError::storage(format!("Invalid media type: {}", media_type))
                })?,
                status: MediaStatus::parse(&status).ok_or_else(|| {
                    ShelfError::storage(format!("Invalid media status: {}", status))
                })?,
            })
        })
        .collect()
}

/// Collection names for every media item a user owns, in one query
pub async fn index_for_user(pool: &SqlitePool, user_id: UserId) -> Result<MembershipIndex> {
    let rows = sqlx::query(
        r#"
        SELECT cm.media_id, c.name
        FROM collection_media cm
        INNER JOIN collections c ON c.id = cm.collection_id
        INNER JOIN media m ON m.id = cm.media_id
        WHERE m.user_id = ?
        ORDER BY cm.media_id, c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.get::<MediaId, _>("media_id"), row.get::<String, _>("name")))
        .collect())
}

pub(crate) async fn remove_for_media(conn: &mut SqliteConnection, media_id: MediaId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM collection_media WHERE media_id = ?")
        .bind(media_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub(crate) async fn remove_for_collection(
    conn: &mut SqliteConnection,
    collection_id: CollectionId,
) -> Result<u64> {
    let result = sqlx::query("DELETE FROM collection_media WHERE collection_id = ?")
        .bind(collection_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
