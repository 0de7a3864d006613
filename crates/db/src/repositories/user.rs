use crate::{error::map_db_error, models::DbUser};
use chrono::Utc;
use psychbook_core::{
    errors::BookingResult,
    models::user::{NewUser, Role, User},
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(pool: &Pool<Postgres>, user: &NewUser) -> BookingResult<User> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating user: id={}, email={}, role={}", id, user.email, user.role);

    let row = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, email, username, role, is_active, created_at)
        VALUES ($1, $2, $3, $4, TRUE, $5)
        RETURNING id, email, username, role, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(&user.email)
    .bind(&user.username)
    .bind(user.role.as_str())
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(map_db_error)?;

    row.try_into()
}

pub async fn find_user_with_role(
    pool: &Pool<Postgres>,
    id: Uuid,
    role: Role,
) -> BookingResult<Option<User>> {
    let row = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, username, role, is_active, created_at
        FROM users
        WHERE id = $1 AND role = $2
        "#,
    )
    .bind(id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)?;

    row.map(User::try_from).transpose()
}
