use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest page a client may request; larger requests are capped
pub const MAX_PAGE_SIZE: u32 = 50;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_MIN_AGE: u32 = 18;
pub const DEFAULT_MAX_AGE: u32 = 99;

/// Errors raised while turning raw query values into a [`ListingFilter`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unsupported gender: {0} (expected male or female)")]
    UnsupportedGender(String),

    #[error("likers and likees cannot be requested together")]
    ConflictingRelationship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(FilterError::UnsupportedGender(s.to_string())),
        }
    }
}

/// Ordering applied to the filtered members, always newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Created,
    #[default]
    LastActive,
}

impl SortKey {
    /// Anything other than `created` sorts by last activity
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()) {
            Some(key) if key == "created" => SortKey::Created,
            _ => SortKey::LastActive,
        }
    }
}

/// Direction of the like edge used to narrow a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipFilter {
    /// Members who liked the requester
    Likers,
    /// Members the requester liked
    Likees,
}

impl RelationshipFilter {
    pub fn from_flags(likers: bool, likees: bool) -> Result<Option<Self>, FilterError> {
        match (likers, likees) {
            (true, true) => Err(FilterError::ConflictingRelationship),
            (true, false) => Ok(Some(RelationshipFilter::Likers)),
            (false, true) => Ok(Some(RelationshipFilter::Likees)),
            (false, false) => Ok(None),
        }
    }
}

/// Per-request listing parameters
///
/// Built from the query string of each listing request and never persisted.
/// Page size is clamped on every assignment, so the stored value never
/// exceeds [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
    page_number: u32,
    page_size: u32,
    pub requester_id: i32,
    pub gender: Option<Gender>,
    pub min_age: u32,
    pub max_age: u32,
    pub sort_key: SortKey,
    pub relationship: Option<RelationshipFilter>,
}

impl ListingFilter {
    pub fn new(requester_id: i32) -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            requester_id,
            gender: None,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            sort_key: SortKey::default(),
            relationship: None,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    }

    pub fn paginate(mut self, page_number: u32, page_size: u32) -> Self {
        self.set_page_number(page_number);
        self.set_page_size(page_size);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn ages(mut self, min_age: u32, max_age: u32) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    pub fn sort_by(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn relationship(mut self, relationship: RelationshipFilter) -> Self {
        self.relationship = Some(relationship);
        self
    }

    /// Both age bounds untouched means no age predicate at all
    pub fn has_default_age_bounds(&self) -> bool {
        self.min_age == DEFAULT_MIN_AGE && self.max_age == DEFAULT_MAX_AGE
    }

    /// Gender to list, falling back to the opposite of the requester's own
    pub fn effective_gender(&self, requester_gender: Gender) -> Gender {
        self.gender.unwrap_or_else(|| requester_gender.opposite())
    }
}
