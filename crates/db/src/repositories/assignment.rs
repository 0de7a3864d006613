use crate::{
    error::map_db_error,
    models::{DbAssignedPsychologist, DbCabinPsychologist},
};
use chrono::Utc;
use psychbook_core::{
    errors::BookingResult,
    models::cabin::{AssignedPsychologist, CabinPsychologist},
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts an assignment. A psychologist already linked to any cabin trips
/// `unique_psychologist_assignment` and comes back as a conflict.
pub async fn create_assignment(
    pool: &Pool<Postgres>,
    cabin_id: Uuid,
    psychologist_id: Uuid,
) -> BookingResult<CabinPsychologist> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Assigning psychologist: id={}, cabin_id={}, psychologist_id={}",
        id, cabin_id, psychologist_id
    );

    let assignment = sqlx::query_as::<_, DbCabinPsychologist>(
        r#"
        INSERT INTO cabin_psychologists (id, cabin_id, psychologist_id, joined_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, cabin_id, psychologist_id, joined_at
        "#,
    )
    .bind(id)
    .bind(cabin_id)
    .bind(psychologist_id)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(map_db_error)?;

    Ok(assignment.into())
}

pub async fn assignment_exists(
    pool: &Pool<Postgres>,
    cabin_id: Uuid,
    psychologist_id: Uuid,
) -> BookingResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM cabin_psychologists
            WHERE cabin_id = $1 AND psychologist_id = $2
        );
        "#,
    )
    .bind(cabin_id)
    .bind(psychologist_id)
    .fetch_one(pool)
    .await
    .map_err(map_db_error)?;

    Ok(exists)
}

pub async fn list_assignments(
    pool: &Pool<Postgres>,
    cabin_id: Uuid,
) -> BookingResult<Vec<AssignedPsychologist>> {
    let psychologists = sqlx::query_as::<_, DbAssignedPsychologist>(
        r#"
        SELECT cp.psychologist_id, u.email, u.username, cp.joined_at
        FROM cabin_psychologists cp
        JOIN users u ON u.id = cp.psychologist_id
        WHERE cp.cabin_id = $1
        ORDER BY cp.joined_at ASC
        "#,
    )
    .bind(cabin_id)
    .fetch_all(pool)
    .await
    .map_err(map_db_error)?;

    Ok(psychologists.into_iter().map(AssignedPsychologist::from).collect())
}

pub async fn find_assignment_for(
    pool: &Pool<Postgres>,
    psychologist_id: Uuid,
) -> BookingResult<Option<CabinPsychologist>> {
    let assignment = sqlx::query_as::<_, DbCabinPsychologist>(
        r#"
        SELECT id, cabin_id, psychologist_id, joined_at
        FROM cabin_psychologists
        WHERE psychologist_id = $1
        "#,
    )
    .bind(psychologist_id)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?;

    Ok(assignment.map(CabinPsychologist::from))
}

pub async fn delete_assignment(
    pool: &Pool<Postgres>,
    cabin_id: Uuid,
    psychologist_id: Uuid,
) -> BookingResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM cabin_psychologists
        WHERE cabin_id = $1 AND psychologist_id = $2
        "#,
    )
    .bind(cabin_id)
    .bind(psychologist_id)
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected() > 0)
}
