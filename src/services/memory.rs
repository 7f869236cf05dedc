use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::core::params::Gender;
use crate::models::{Like, Member, UpdateMemberRequest};
use crate::services::store::{MemberStore, StoreError};

/// In-process member store
///
/// Holds everything behind async locks; used for tests and local runs
/// without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    members: RwLock<BTreeMap<i32, Member>>,
    likes: RwLock<BTreeSet<Like>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(
        members: impl IntoIterator<Item = Member>,
        likes: impl IntoIterator<Item = Like>,
    ) -> Self {
        Self {
            members: RwLock::new(members.into_iter().map(|m| (m.id, m)).collect()),
            likes: RwLock::new(likes.into_iter().collect()),
        }
    }

    pub async fn like_count(&self) -> usize {
        self.likes.read().await.len()
    }
}

impl MemberStore for MemoryStore {
    async fn get_member(&self, id: i32) -> Result<Option<Member>, StoreError> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn list_members(&self, gender: Gender) -> Result<Vec<Member>, StoreError> {
        Ok(self
            .members
            .read()
            .await
            .values()
            .filter(|member| member.gender == gender)
            .cloned()
            .collect())
    }

    async fn likes_involving(&self, member_id: i32) -> Result<Vec<Like>, StoreError> {
        Ok(self
            .likes
            .read()
            .await
            .iter()
            .filter(|like| like.liker_id == member_id || like.likee_id == member_id)
            .copied()
            .collect())
    }

    async fn add_like(&self, like: Like) -> Result<(), StoreError> {
        let members = self.members.read().await;
        if !members.contains_key(&like.liker_id) || !members.contains_key(&like.likee_id) {
            return Err(StoreError::NotFound(format!(
                "like {} -> {} references an unknown member",
                like.liker_id, like.likee_id
            )));
        }

        if !self.likes.write().await.insert(like) {
            return Err(StoreError::Conflict(format!(
                "like {} -> {} already exists",
                like.liker_id, like.likee_id
            )));
        }

        Ok(())
    }

    async fn update_member(&self, id: i32, update: &UpdateMemberRequest) -> Result<(), StoreError> {
        let mut members = self.members.write().await;
        let member = members
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("member {}", id)))?;

        member.introduction = update.introduction.clone();
        member.looking_for = update.looking_for.clone();
        member.interests = update.interests.clone();
        member.city = update.city.clone();
        member.country = update.country.clone();

        Ok(())
    }

    async fn touch_last_active(&self, member_id: i32, at: DateTime<Utc>) -> Result<(), StoreError> {
        match self.members.write().await.get_mut(&member_id) {
            Some(member) => {
                member.last_active = at;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("member {}", member_id))),
        }
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
