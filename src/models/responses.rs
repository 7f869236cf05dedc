use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::clock::calculate_age;
use crate::core::params::Gender;
use crate::models::domain::Member;

/// Member as shown in a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: i32,
    pub username: String,
    pub known_as: String,
    pub gender: Gender,
    pub age: i32,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub city: String,
    pub country: String,
    pub photo_url: Option<String>,
}

impl MemberSummary {
    pub fn from_member(member: Member, today: NaiveDate) -> Self {
        Self {
            age: calculate_age(member.date_of_birth, today),
            id: member.id,
            username: member.username,
            known_as: member.known_as,
            gender: member.gender,
            created: member.created,
            last_active: member.last_active,
            city: member.city,
            country: member.country,
            photo_url: member.photo_url,
        }
    }
}

/// Full member profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    #[serde(flatten)]
    pub summary: MemberSummary,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
}

impl MemberDetail {
    pub fn from_member(mut member: Member, today: NaiveDate) -> Self {
        let introduction = member.introduction.take();
        let looking_for = member.looking_for.take();
        let interests = member.interests.take();

        Self {
            summary: MemberSummary::from_member(member, today),
            introduction,
            looking_for,
            interests,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
