// Integration tests for the listing pipeline

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use dating_api::core::{
    FixedClock, Gender, LikeGraph, ListingFilter, MemberLister, RelationshipFilter, SortKey,
};
use dating_api::models::{Like, ListMembersQuery, Member};
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn create_test_member(id: i32, gender: Gender, date_of_birth: NaiveDate) -> Member {
    let base = Utc.with_ymd_and_hms(2026, 9, 30, 18, 0, 0).unwrap();
    Member {
        id,
        username: format!("user{}", id),
        known_as: format!("User {}", id),
        gender,
        date_of_birth,
        created: base - Duration::days(100 - id as i64),
        last_active: base - Duration::minutes(id as i64),
        introduction: None,
        looking_for: None,
        interests: None,
        city: "Glasgow".to_string(),
        country: "United Kingdom".to_string(),
        photo_url: None,
    }
}

fn lister() -> MemberLister {
    MemberLister::new(Arc::new(FixedClock::on(today())))
}

fn born(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_integration_end_to_end_listing() {
    let candidates = vec![
        // requester
        create_test_member(1, Gender::Female, born(1996, 4, 2)),
        // 32, kept
        create_test_member(2, Gender::Male, born(1994, 1, 20)),
        // 26, kept
        create_test_member(3, Gender::Male, born(1999, 10, 20)),
        // 46, too old
        create_test_member(4, Gender::Male, born(1980, 2, 2)),
        // wrong gender
        create_test_member(5, Gender::Female, born(1995, 5, 5)),
        // 21, too young
        create_test_member(6, Gender::Male, born(2004, 10, 20)),
        // 35 today, kept
        create_test_member(7, Gender::Male, born(1991, 10, 19)),
    ];

    let query = ListMembersQuery {
        min_age: Some(22),
        max_age: Some(35),
        order_by: Some("created".to_string()),
        ..Default::default()
    };
    let filter = query.into_filter(1).unwrap();
    let gender = filter.effective_gender(Gender::Female);
    assert_eq!(gender, Gender::Male);

    let page = lister().list(&filter, Gender::Female, candidates, &LikeGraph::new());
    let ids: Vec<i32> = page.items().iter().map(|m| m.id).collect();

    // created later for higher ids
    assert_eq!(ids, vec![7, 3, 2]);
    for member in page.items() {
        assert!(member.age >= 22 && member.age <= 35, "age {} out of range", member.age);
    }
}

#[test]
fn test_pages_cover_every_member_once() {
    for n in [0usize, 1, 4, 5, 6, 12, 49, 50, 51] {
        for page_size in [1u32, 3, 5, 10, 50] {
            let candidates: Vec<Member> = (1..=n as i32)
                .map(|id| create_test_member(id + 1, Gender::Male, born(1990, 1, 1)))
                .collect();
            let first = lister().list(
                &ListingFilter::new(1).paginate(1, page_size),
                Gender::Female,
                candidates.clone(),
                &LikeGraph::new(),
            );
            let total_pages = first.total_pages();
            assert_eq!(total_pages, n.div_ceil(page_size as usize));

            let mut seen = Vec::new();
            for page_number in 1..=total_pages as u32 {
                let filter = ListingFilter::new(1).paginate(page_number, page_size);
                let page = lister().list(&filter, Gender::Female, candidates.clone(), &LikeGraph::new());
                assert!(page.items().len() <= page_size as usize);
                seen.extend(page.items().iter().map(|m| m.id));
            }

            assert_eq!(seen.len(), n);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), n);
        }
    }
}

#[test]
fn test_twelve_members_five_per_page() {
    let candidates: Vec<Member> = (2..=13)
        .map(|id| create_test_member(id, Gender::Male, born(1990, 1, 1)))
        .collect();

    let pages: Vec<_> = (1..=3)
        .map(|page_number| {
            let filter = ListingFilter::new(1).paginate(page_number, 5);
            lister().list(&filter, Gender::Female, candidates.clone(), &LikeGraph::new())
        })
        .collect();

    assert_eq!(pages[0].items().len(), 5);
    assert_eq!(pages[0].items()[0].id, 2);
    assert_eq!(pages[2].items().iter().map(|m| m.id).collect::<Vec<_>>(), vec![12, 13]);
    for page in &pages {
        let header = page.header();
        assert_eq!(header.total_items, 12);
        assert_eq!(header.total_pages, 3);
    }
}

#[test]
fn test_page_after_last_is_empty() {
    let candidates: Vec<Member> = (2..=13)
        .map(|id| create_test_member(id, Gender::Male, born(1990, 1, 1)))
        .collect();
    let filter = ListingFilter::new(1).paginate(4, 5);

    let (items, header) = lister()
        .list(&filter, Gender::Female, candidates, &LikeGraph::new())
        .into_parts();

    assert!(items.is_empty());
    assert_eq!(header.current_page, 4);
    assert_eq!(header.total_pages, 3);
}

#[test]
fn test_likers_scenario() {
    let candidates: Vec<Member> = [3, 5, 9, 11]
        .into_iter()
        .map(|id| create_test_member(id, Gender::Male, born(1990, 1, 1)))
        .collect();
    let likes: LikeGraph = [Like::new(3, 7), Like::new(9, 7), Like::new(3, 5)]
        .into_iter()
        .collect();
    let filter = ListingFilter::new(7).relationship(RelationshipFilter::Likers);

    let page = lister().list(&filter, Gender::Female, candidates, &likes);
    let mut ids: Vec<i32> = page.items().iter().map(|m| m.id).collect();
    ids.sort_unstable();

    assert_eq!(ids, vec![3, 9]);
}

#[test]
fn test_default_ages_do_not_filter_minors() {
    // 17 on the fixed date
    let candidates = vec![create_test_member(2, Gender::Male, born(2009, 3, 1))];

    let page = lister().list(&ListingFilter::new(1), Gender::Female, candidates.clone(), &LikeGraph::new());
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].age, 17);

    // any change to the bounds turns the age check on
    let filter = ListingFilter::new(1).ages(18, 100);
    let page = lister().list(&filter, Gender::Female, candidates, &LikeGraph::new());
    assert!(page.items().is_empty());
}

#[test]
fn test_sort_by_last_active_by_default() {
    let candidates: Vec<Member> = [5, 2, 9]
        .into_iter()
        .map(|id| create_test_member(id, Gender::Male, born(1990, 1, 1)))
        .collect();
    let filter = ListingFilter::new(1);
    assert_eq!(filter.sort_key, SortKey::LastActive);

    let page = lister().list(&filter, Gender::Female, candidates, &LikeGraph::new());

    assert_eq!(page.items().iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 5, 9]);
}

#[test]
fn test_equal_timestamps_page_independent_of_snapshot_order() {
    let same_instant = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    let candidates: Vec<Member> = (2..=7)
        .map(|id| {
            let mut member = create_test_member(id, Gender::Male, born(1990, 1, 1));
            member.last_active = same_instant;
            member
        })
        .collect();
    let reversed: Vec<Member> = candidates.iter().rev().cloned().collect();

    let page_ids = |snapshot: Vec<Member>, page_number: u32| -> Vec<i32> {
        let filter = ListingFilter::new(1).paginate(page_number, 3);
        lister()
            .list(&filter, Gender::Female, snapshot, &LikeGraph::new())
            .items()
            .iter()
            .map(|m| m.id)
            .collect()
    };

    assert_eq!(page_ids(candidates.clone(), 1), vec![2, 3, 4]);
    assert_eq!(page_ids(reversed.clone(), 1), vec![2, 3, 4]);
    assert_eq!(page_ids(candidates, 2), vec![5, 6, 7]);
    assert_eq!(page_ids(reversed, 2), vec![5, 6, 7]);
}
