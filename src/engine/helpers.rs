use super::Database;

use sqlx::{sqlite::SqliteRow, types::Json, Executor, Row};
use uuid::Uuid;

use crate::{entities::Place, error::Error};

pub fn decode_place(row: &SqliteRow) -> Result<Place, Error> {
    let Json(place): Json<Place> = row.try_get("data")?;

    Ok(place)
}

#[tracing::instrument(skip(executor))]
pub async fn fetch_place<'e, E>(executor: E, id: Uuid) -> Result<Place, Error>
where
    E: Executor<'e, Database = Database>,
{
    let row = executor
        .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = ?1").bind(id))
        .await?
        .ok_or_else(Error::not_found_error)?;

    decode_place(&row)
}

#[tracing::instrument(skip(executor, place), fields(id = %place.id))]
pub async fn insert_place<'e, E>(executor: E, place: &Place) -> Result<(), Error>
where
    E: Executor<'e, Database = Database>,
{
    executor
        .execute(
            sqlx::query("INSERT INTO places (id, is_saved, data) VALUES (?1, ?2, ?3)")
                .bind(place.id)
                .bind(place.is_saved)
                .bind(Json(place)),
        )
        .await?;

    Ok(())
}

#[tracing::instrument(skip(executor, place), fields(id = %place.id))]
pub async fn update_place<'e, E>(executor: E, place: &Place) -> Result<(), Error>
where
    E: Executor<'e, Database = Database>,
{
    executor
        .execute(
            sqlx::query("UPDATE places SET is_saved = ?2, data = ?3 WHERE id = ?1")
                .bind(place.id)
                .bind(place.is_saved)
                .bind(Json(place)),
        )
        .await?;

    Ok(())
}

/// Returns whether a row was removed.
#[tracing::instrument(skip(executor))]
pub async fn delete_place<'e, E>(executor: E, id: Uuid) -> Result<bool, Error>
where
    E: Executor<'e, Database = Database>,
{
    let result = executor
        .execute(sqlx::query("DELETE FROM places WHERE id = ?1").bind(id))
        .await?;

    Ok(result.rows_affected() > 0)
}
