//! Dating API - member listing service
//!
//! Lists members for a requester with gender, age and like-relationship
//! filters, newest first, one page at a time. Paging totals are returned
//! beside the page rather than inside it so the HTTP layer can send them
//! as a response header.

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    Clock, FixedClock, LikeGraph, ListingFilter, MemberLister, PagedList, PaginationHeader,
    SystemClock,
};
pub use crate::models::{Like, ListMembersQuery, Member, MemberDetail, MemberSummary};
pub use crate::services::{MemberStore, MemoryStore, PostgresClient, StoreError};
