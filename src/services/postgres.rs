use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::core::params::Gender;
use crate::models::{Like, Member, UpdateMemberRequest};
use crate::services::store::{MemberStore, StoreError};

const MEMBER_COLUMNS: &str = r#"
    id, username, known_as, gender, date_of_birth, created, last_active,
    introduction, looking_for, interests, city, country, photo_url
"#;

/// PostgreSQL-backed member store
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    fn member_from_row(row: &PgRow) -> Result<Member, StoreError> {
        let gender: String = row.try_get("gender")?;
        let gender = gender
            .parse::<Gender>()
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        Ok(Member {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            known_as: row.try_get("known_as")?,
            gender,
            date_of_birth: row.try_get("date_of_birth")?,
            created: row.try_get("created")?,
            last_active: row.try_get("last_active")?,
            introduction: row.try_get("introduction")?,
            looking_for: row.try_get("looking_for")?,
            interests: row.try_get("interests")?,
            city: row.try_get("city")?,
            country: row.try_get("country")?,
            photo_url: row.try_get("photo_url")?,
        })
    }
}

impl MemberStore for PostgresClient {
    async fn get_member(&self, id: i32) -> Result<Option<Member>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", MEMBER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::member_from_row).transpose()
    }

    /// Gender is narrowed in SQL; age and relationship checks stay in the core
    async fn list_members(&self, gender: Gender) -> Result<Vec<Member>, StoreError> {
        let query = format!(
            "SELECT {} FROM users WHERE gender = $1 ORDER BY id",
            MEMBER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(gender.as_str())
            .fetch_all(&self.pool)
            .await?;

        let members: Result<Vec<Member>, StoreError> =
            rows.iter().map(Self::member_from_row).collect();

        let members = members?;
        tracing::debug!("Loaded {} {} members", members.len(), gender);
        Ok(members)
    }

    async fn likes_involving(&self, member_id: i32) -> Result<Vec<Like>, StoreError> {
        let query = r#"
            SELECT liker_id, likee_id
            FROM likes
            WHERE liker_id = $1 OR likee_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<Like, StoreError> {
                Ok(Like {
                    liker_id: row.try_get("liker_id")?,
                    likee_id: row.try_get("likee_id")?,
                })
            })
            .collect()
    }

    /// Relies on the composite primary key to detect repeats
    async fn add_like(&self, like: Like) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO likes (liker_id, likee_id)
            VALUES ($1, $2)
            ON CONFLICT (liker_id, likee_id) DO NOTHING
        "#;

        let result = sqlx::query(query)
            .bind(like.liker_id)
            .bind(like.likee_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(format!(
                "like {} -> {} already exists",
                like.liker_id, like.likee_id
            )));
        }

        tracing::debug!("Recorded like: {} -> {}", like.liker_id, like.likee_id);

        Ok(())
    }

    async fn update_member(&self, id: i32, update: &UpdateMemberRequest) -> Result<(), StoreError> {
        let query = r#"
            UPDATE users
            SET introduction = $2, looking_for = $3, interests = $4, city = $5, country = $6
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(&update.introduction)
            .bind(&update.looking_for)
            .bind(&update.interests)
            .bind(&update.city)
            .bind(&update.country)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("member {}", id)));
        }

        tracing::debug!("Updated profile of member {}", id);

        Ok(())
    }

    async fn touch_last_active(&self, member_id: i32, at: DateTime<Utc>) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET last_active = $2 WHERE id = $1")
            .bind(member_id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("member {}", member_id)));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
