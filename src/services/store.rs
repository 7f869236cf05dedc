use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::params::Gender;
use crate::models::{Like, Member, UpdateMemberRequest};

/// Errors that can occur when reading or writing members and likes
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Persistence seam for the listing and like endpoints
///
/// Handlers run on actix's single-threaded workers, so returned futures
/// need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait MemberStore {
    async fn get_member(&self, id: i32) -> Result<Option<Member>, StoreError>;

    /// Snapshot of every member of `gender`, in no particular order
    async fn list_members(&self, gender: Gender) -> Result<Vec<Member>, StoreError>;

    /// Every like where `member_id` is the liker or the likee
    async fn likes_involving(&self, member_id: i32) -> Result<Vec<Like>, StoreError>;

    /// Insert a like edge; an existing edge is a [`StoreError::Conflict`]
    async fn add_like(&self, like: Like) -> Result<(), StoreError>;

    /// Overwrite the editable profile fields; an unknown id is [`StoreError::NotFound`]
    async fn update_member(&self, id: i32, update: &UpdateMemberRequest) -> Result<(), StoreError>;

    async fn touch_last_active(&self, member_id: i32, at: DateTime<Utc>) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
