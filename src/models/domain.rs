use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::params::Gender;

/// A registered member as stored by the member store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub username: String,
    pub known_as: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub looking_for: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    pub city: String,
    pub country: String,
    /// URL of the member's main photo, if one was uploaded
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Directed "like" edge from `liker_id` to `likee_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub liker_id: i32,
    pub likee_id: i32,
}

impl Like {
    pub fn new(liker_id: i32, likee_id: i32) -> Self {
        Self { liker_id, likee_id }
    }

    pub fn is_self_like(&self) -> bool {
        self.liker_id == self.likee_id
    }
}
