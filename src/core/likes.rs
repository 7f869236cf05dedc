use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::core::params::RelationshipFilter;
use crate::models::Like;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LikeError {
    #[error("you cannot like yourself")]
    SelfLike,

    #[error("you already like this user")]
    AlreadyLiked,
}

/// Directed like edges with one index per direction
///
/// `by_liker` answers "who did this member like" and `by_likee` answers
/// "who liked this member". Both views are kept in step by [`LikeGraph::insert`].
#[derive(Debug, Clone, Default)]
pub struct LikeGraph {
    by_liker: HashMap<i32, HashSet<i32>>,
    by_likee: HashMap<i32, HashSet<i32>>,
    len: usize,
}

impl LikeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, rejecting self-likes and repeats of an existing edge
    pub fn insert(&mut self, like: Like) -> Result<(), LikeError> {
        if like.is_self_like() {
            return Err(LikeError::SelfLike);
        }
        if self.contains(like.liker_id, like.likee_id) {
            return Err(LikeError::AlreadyLiked);
        }

        self.by_liker
            .entry(like.liker_id)
            .or_default()
            .insert(like.likee_id);
        self.by_likee
            .entry(like.likee_id)
            .or_default()
            .insert(like.liker_id);
        self.len += 1;

        Ok(())
    }

    pub fn contains(&self, liker_id: i32, likee_id: i32) -> bool {
        self.by_liker
            .get(&liker_id)
            .is_some_and(|likees| likees.contains(&likee_id))
    }

    /// Members who liked `member_id`
    pub fn likers_of(&self, member_id: i32) -> impl Iterator<Item = i32> + '_ {
        self.by_likee.get(&member_id).into_iter().flatten().copied()
    }

    /// Members `member_id` has liked
    pub fn likees_of(&self, member_id: i32) -> impl Iterator<Item = i32> + '_ {
        self.by_liker.get(&member_id).into_iter().flatten().copied()
    }

    /// Whether `other_id` is on the requested side of `member_id`'s edges
    pub fn is_related(&self, member_id: i32, other_id: i32, filter: RelationshipFilter) -> bool {
        match filter {
            RelationshipFilter::Likers => self.contains(other_id, member_id),
            RelationshipFilter::Likees => self.contains(member_id, other_id),
        }
    }

    /// Sorted ids on the requested side of `member_id`'s edges
    pub fn related_ids(&self, member_id: i32, filter: RelationshipFilter) -> Vec<i32> {
        let mut ids: Vec<i32> = match filter {
            RelationshipFilter::Likers => self.likers_of(member_id).collect(),
            RelationshipFilter::Likees => self.likees_of(member_id).collect(),
        };
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl FromIterator<Like> for LikeGraph {
    /// Builds a graph from stored edges; invalid or repeated edges are skipped
    fn from_iter<I: IntoIterator<Item = Like>>(iter: I) -> Self {
        let mut graph = LikeGraph::new();
        for like in iter {
            if let Err(e) = graph.insert(like) {
                tracing::debug!("Skipping like {} -> {}: {}", like.liker_id, like.likee_id, e);
            }
        }
        graph
    }
}
