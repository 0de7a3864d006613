use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(254) NOT NULL,
            username VARCHAR(50) NOT NULL DEFAULT '',
            role VARCHAR(20) NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_user_email UNIQUE (email),
            CONSTRAINT valid_user_role CHECK (role IN ('admin', 'psychologist'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create cabins table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cabins (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(100) NOT NULL,
            location VARCHAR(255) NULL,
            created_by UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create rooms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            cabin_id UUID NOT NULL REFERENCES cabins(id) ON DELETE CASCADE,
            name VARCHAR(100) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One cabin per psychologist across the whole system
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cabin_psychologists (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            cabin_id UUID NOT NULL REFERENCES cabins(id) ON DELETE CASCADE,
            psychologist_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            joined_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_psychologist_assignment UNIQUE (psychologist_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            cabin_id UUID NOT NULL REFERENCES cabins(id) ON DELETE CASCADE,
            psychologist_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            client_name VARCHAR(100) NOT NULL,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(10) NOT NULL DEFAULT 'pending',
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_appointment_slot UNIQUE (cabin_id, date, start_time, end_time),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_cabins_created_by ON cabins(created_by);
        CREATE INDEX IF NOT EXISTS idx_rooms_cabin_id ON rooms(cabin_id);
        CREATE INDEX IF NOT EXISTS idx_cabin_psychologists_cabin_id ON cabin_psychologists(cabin_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_psychologist_id ON appointments(psychologist_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_cabin_date ON appointments(cabin_id, date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
