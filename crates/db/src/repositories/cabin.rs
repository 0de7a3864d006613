use crate::{
    error::map_db_error,
    models::{DbCabin, DbRoom},
};
use chrono::Utc;
use psychbook_core::{
    errors::{BookingError, BookingResult},
    models::cabin::{Cabin, NewCabin, Room},
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

// Cabin Repository

pub async fn create_cabin(pool: &Pool<Postgres>, new_cabin: &NewCabin) -> BookingResult<Cabin> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating cabin: id={}, name={}, created_by={}",
        id,
        new_cabin.name,
        new_cabin.created_by
    );

    let cabin = sqlx::query_as::<_, DbCabin>(
        r#"
        INSERT INTO cabins (id, name, location, created_by, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, location, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(&new_cabin.name)
    .bind(&new_cabin.location)
    .bind(new_cabin.created_by)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(map_db_error)?;

    Ok(cabin.into())
}

pub async fn find_cabin(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<Option<Cabin>> {
    let cabin = sqlx::query_as::<_, DbCabin>(
        r#"
        SELECT id, name, location, created_by, created_at
        FROM cabins
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?;

    Ok(cabin.map(Cabin::from))
}

pub async fn list_cabins_by_owner(pool: &Pool<Postgres>, owner: Uuid) -> BookingResult<Vec<Cabin>> {
    let cabins = sqlx::query_as::<_, DbCabin>(
        r#"
        SELECT id, name, location, created_by, created_at
        FROM cabins
        WHERE created_by = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await
    .map_err(map_db_error)?;

    Ok(cabins.into_iter().map(Cabin::from).collect())
}

pub async fn update_cabin(pool: &Pool<Postgres>, cabin: &Cabin) -> BookingResult<Cabin> {
    let updated = sqlx::query_as::<_, DbCabin>(
        r#"
        UPDATE cabins
        SET name = $2, location = $3
        WHERE id = $1
        RETURNING id, name, location, created_by, created_at
        "#,
    )
    .bind(cabin.id)
    .bind(&cabin.name)
    .bind(cabin.location.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| BookingError::NotFound(format!("Cabin with ID {} not found", cabin.id)))?;

    Ok(updated.into())
}

pub async fn delete_cabin(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM cabins
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected() > 0)
}

// Room Repository

pub async fn create_room(pool: &Pool<Postgres>, cabin_id: Uuid, name: &str) -> BookingResult<Room> {
    let id = Uuid::new_v4();

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        INSERT INTO rooms (id, cabin_id, name)
        VALUES ($1, $2, $3)
        RETURNING id, cabin_id, name
        "#,
    )
    .bind(id)
    .bind(cabin_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(map_db_error)?;

    Ok(room.into())
}

pub async fn list_rooms(pool: &Pool<Postgres>, cabin_id: Uuid) -> BookingResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, cabin_id, name
        FROM rooms
        WHERE cabin_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(cabin_id)
    .fetch_all(pool)
    .await
    .map_err(map_db_error)?;

    Ok(rooms.into_iter().map(Room::from).collect())
}

pub async fn find_room(
    pool: &Pool<Postgres>,
    cabin_id: Uuid,
    room_id: Uuid,
) -> BookingResult<Option<Room>> {
    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, cabin_id, name
        FROM rooms
        WHERE id = $1 AND cabin_id = $2
        "#,
    )
    .bind(room_id)
    .bind(cabin_id)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?;

    Ok(room.map(Room::from))
}

pub async fn update_room(pool: &Pool<Postgres>, room: &Room) -> BookingResult<Room> {
    let updated = sqlx::query_as::<_, DbRoom>(
        r#"
        UPDATE rooms
        SET name = $3
        WHERE id = $1 AND cabin_id = $2
        RETURNING id, cabin_id, name
        "#,
    )
    .bind(room.id)
    .bind(room.cabin_id)
    .bind(&room.name)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| BookingError::NotFound(format!("Room with ID {} not found", room.id)))?;

    Ok(updated.into())
}

pub async fn delete_room(pool: &Pool<Postgres>, cabin_id: Uuid, room_id: Uuid) -> BookingResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM rooms
        WHERE id = $1 AND cabin_id = $2
        "#,
    )
    .bind(room_id)
    .bind(cabin_id)
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected() > 0)
}
