use crate::{memberships, now_timestamp};
use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};

fn from_row(row: &SqliteRow) -> Collection {
    Collection {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        description: row.get("description"),
        date_added: row.get("date_added"),
    }
}

/// Get all collections owned by a user
pub async fn get_all(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Collection>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, name, description, date_added
        FROM collections
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Get collection by ID
pub async fn get_by_id(pool: &SqlitePool, id: CollectionId) -> Result<Option<Collection>> {
    let row = sqlx::query(
        "SELECT id, user_id, name, description, date_added FROM collections WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Owner of a collection, if it exists
pub(crate) async fn owner_of(
    conn: &mut SqliteConnection,
    id: CollectionId,
) -> Result<Option<UserId>> {
    let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM collections WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(owner)
}

/// Create a new collection
pub async fn create(pool: &SqlitePool, collection: CreateCollection) -> Result<Collection> {
    let result = sqlx::query(
        "INSERT INTO collections (user_id, name, description, date_added) VALUES (?, ?, ?, ?)",
    )
    .bind(collection.user_id)
    .bind(&collection.name)
    .bind(&collection.description)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    tracing::info!(collection_id = id, user_id = collection.user_id, "Collection created");

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ShelfError::storage("Failed to retrieve created collection"))
}

/// Update name and/or description
pub async fn update(
    pool: &SqlitePool,
    id: CollectionId,
    update: UpdateCollection,
) -> Result<Collection> {
    let mut query_parts = Vec::new();

    if update.name.is_some() {
        query_parts.push("name = ?");
    }
    if update.description.is_some() {
        query_parts.push("description = ?");
    }

    if query_parts.is_empty() {
        return Err(ShelfError::invalid_input("No fields to update"));
    }

    let query_str = format!(
        "UPDATE collections SET {} WHERE id = ?",
        query_parts.join(", ")
    );
    let mut query = sqlx::query(&query_str);

    if let Some(name) = &update.name {
        query = query.bind(name);
    }
    if let Some(description) = &update.description {
        query = query.bind(description.clone());
    }

    let result = query.bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Collection", id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ShelfError::not_found("Collection", id))
}

/// Delete a collection and every membership pointing at it
pub async fn delete(pool: &SqlitePool, id: CollectionId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let unlinked = memberships::remove_for_collection(&mut tx, id).await?;

    let result = sqlx::query("DELETE FROM collections WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Collection", id));
    }

    tx.commit().await?;

    tracing::info!(collection_id = id, unlinked, "Collection deleted");

    Ok(())
}
