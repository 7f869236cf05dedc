use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::params::{FilterError, Gender, ListingFilter, RelationshipFilter, SortKey};

/// Query string of `GET /api/users`
///
/// Every field is optional; absent values take the listing defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    #[validate(range(min = 1))]
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub gender: Option<String>,
    #[validate(range(max = 150))]
    pub min_age: Option<u32>,
    #[validate(range(max = 150))]
    pub max_age: Option<u32>,
    pub order_by: Option<String>,
    #[serde(default)]
    pub likers: bool,
    #[serde(default)]
    pub likees: bool,
}

impl ListMembersQuery {
    /// Normalize into a filter for `requester_id`
    ///
    /// An empty `gender` counts as absent. Page size is capped rather than
    /// rejected and unknown sort keys fall back to last activity.
    pub fn into_filter(self, requester_id: i32) -> Result<ListingFilter, FilterError> {
        let mut filter = ListingFilter::new(requester_id);

        if let Some(page_number) = self.page_number {
            filter.set_page_number(page_number);
        }
        if let Some(page_size) = self.page_size {
            filter.set_page_size(page_size);
        }
        if let Some(min_age) = self.min_age {
            filter.min_age = min_age;
        }
        if let Some(max_age) = self.max_age {
            filter.max_age = max_age;
        }

        filter.gender = match self.gender.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<Gender>()?),
            _ => None,
        };
        filter.sort_key = SortKey::parse(self.order_by.as_deref());
        filter.relationship = RelationshipFilter::from_flags(self.likers, self.likees)?;

        Ok(filter)
    }
}

/// Body of `PUT /api/users/{id}`
///
/// Replaces the editable profile text. Absent free-text fields clear the
/// stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(max = 2000))]
    pub introduction: Option<String>,
    #[validate(length(max = 2000))]
    pub looking_for: Option<String>,
    #[validate(length(max = 2000))]
    pub interests: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::MAX_PAGE_SIZE;

    #[test]
    fn test_empty_query_defaults() {
        let filter = ListMembersQuery::default().into_filter(7).unwrap();

        assert_eq!(filter, ListingFilter::new(7));
    }

    #[test]
    fn test_full_query() {
        let query = ListMembersQuery {
            page_number: Some(3),
            page_size: Some(500),
            gender: Some("Female".to_string()),
            min_age: Some(25),
            max_age: Some(40),
            order_by: Some("created".to_string()),
            likers: false,
            likees: true,
        };
        let filter = query.into_filter(7).unwrap();

        assert_eq!(filter.page_number(), 3);
        assert_eq!(filter.page_size(), MAX_PAGE_SIZE);
        assert_eq!(filter.gender, Some(Gender::Female));
        assert_eq!((filter.min_age, filter.max_age), (25, 40));
        assert_eq!(filter.sort_key, SortKey::Created);
        assert_eq!(filter.relationship, Some(RelationshipFilter::Likees));
    }

    #[test]
    fn test_blank_gender_is_absent() {
        let query = ListMembersQuery {
            gender: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(query.into_filter(1).unwrap().gender, None);
    }

    #[test]
    fn test_unsupported_gender_rejected() {
        let query = ListMembersQuery {
            gender: Some("robot".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            query.into_filter(1),
            Err(FilterError::UnsupportedGender(_))
        ));
    }

    #[test]
    fn test_validation() {
        let zero_page = ListMembersQuery {
            page_number: Some(0),
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let ancient = ListMembersQuery {
            max_age: Some(200),
            ..Default::default()
        };
        assert!(ancient.validate().is_err());

        assert!(ListMembersQuery::default().validate().is_ok());
    }

    #[test]
    fn test_update_request_validation() {
        let update = UpdateMemberRequest {
            introduction: Some("Runner and cook".to_string()),
            looking_for: None,
            interests: Some("climbing".to_string()),
            city: "Bath".to_string(),
            country: "United Kingdom".to_string(),
        };
        assert!(update.validate().is_ok());

        let blank_city = UpdateMemberRequest {
            city: String::new(),
            ..update.clone()
        };
        assert!(blank_city.validate().is_err());

        let long_intro = UpdateMemberRequest {
            introduction: Some("x".repeat(2001)),
            ..update
        };
        assert!(long_intro.validate().is_err());
    }
}
