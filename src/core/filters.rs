use chrono::NaiveDate;

use crate::core::clock::add_years;
use crate::core::likes::LikeGraph;
use crate::core::params::{Gender, ListingFilter, RelationshipFilter, SortKey};
use crate::models::Member;

/// Inclusive date-of-birth window equivalent to an age range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDateBounds {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Convert an age range into birth dates relative to `today`
///
/// The earliest date is `today - (max_age + 1)` years and the latest is
/// `today - min_age` years. Ranges beyond the calendar saturate.
pub fn birth_date_bounds(min_age: u32, max_age: u32, today: NaiveDate) -> BirthDateBounds {
    let years_back = |age: u32| i32::try_from(age).ok().and_then(|age| age.checked_neg());

    let earliest = max_age
        .checked_add(1)
        .and_then(years_back)
        .and_then(|years| add_years(today, years))
        .unwrap_or(NaiveDate::MIN);
    let latest = years_back(min_age)
        .and_then(|years| add_years(today, years))
        .unwrap_or(NaiveDate::MIN);

    BirthDateBounds { earliest, latest }
}

#[inline]
pub fn is_not_requester(member: &Member, requester_id: i32) -> bool {
    member.id != requester_id
}

#[inline]
pub fn matches_gender(member: &Member, gender: Gender) -> bool {
    member.gender == gender
}

/// Keep only members on the requested side of the requester's like edges
#[inline]
pub fn matches_relationship(
    member: &Member,
    requester_id: i32,
    relationship: Option<RelationshipFilter>,
    likes: &LikeGraph,
) -> bool {
    match relationship {
        Some(filter) => likes.is_related(requester_id, member.id, filter),
        None => true,
    }
}

#[inline]
pub fn within_birth_dates(member: &Member, bounds: &BirthDateBounds) -> bool {
    member.date_of_birth >= bounds.earliest && member.date_of_birth <= bounds.latest
}

/// Run every listing predicate against one member
///
/// `age_bounds` is `None` when the filter still carries the default ages, in
/// which case no age check happens at all.
pub fn matches_filter(
    member: &Member,
    filter: &ListingFilter,
    gender: Gender,
    likes: &LikeGraph,
    age_bounds: Option<&BirthDateBounds>,
) -> bool {
    if !is_not_requester(member, filter.requester_id) {
        return false;
    }

    if !matches_gender(member, gender) {
        return false;
    }

    if !matches_relationship(member, filter.requester_id, filter.relationship, likes) {
        return false;
    }

    if let Some(bounds) = age_bounds {
        if !within_birth_dates(member, bounds) {
            return false;
        }
    }

    true
}

/// Newest first by the chosen timestamp, then by ascending id
///
/// The id tie-break makes the order independent of how the store returned
/// the snapshot, so consecutive pages never overlap.
pub fn sort_members(members: &mut [Member], sort_key: SortKey) {
    match sort_key {
        SortKey::Created => {
            members.sort_by(|a, b| b.created.cmp(&a.created).then(a.id.cmp(&b.id)))
        }
        SortKey::LastActive => {
            members.sort_by(|a, b| b.last_active.cmp(&a.last_active).then(a.id.cmp(&b.id)))
        }
    }
}
