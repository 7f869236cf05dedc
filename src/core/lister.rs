use std::sync::Arc;

use crate::core::{
    clock::{Clock, SystemClock},
    filters::{birth_date_bounds, matches_filter, sort_members},
    likes::LikeGraph,
    paging::PagedList,
    params::{Gender, ListingFilter},
};
use crate::models::{Member, MemberSummary};

/// Listing orchestrator: filter, sort, then page
///
/// # Pipeline Stages
/// 1. Drop the requester
/// 2. Keep the resolved gender
/// 3. Narrow to likers or likees when asked
/// 4. Apply the age window unless both bounds are at their defaults
/// 5. Sort newest first by creation or last activity
/// 6. Slice out the requested page
///
/// The clock is injected so that ages are computed against a known date.
#[derive(Clone)]
pub struct MemberLister {
    clock: Arc<dyn Clock>,
}

impl MemberLister {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Filter and page `candidates` for one listing request
    ///
    /// # Arguments
    /// * `filter` - Normalized listing parameters
    /// * `requester_gender` - Used when the filter carries no gender
    /// * `candidates` - Snapshot of every member eligible for listing
    /// * `likes` - Like edges touching the requester
    pub fn list(
        &self,
        filter: &ListingFilter,
        requester_gender: Gender,
        candidates: Vec<Member>,
        likes: &LikeGraph,
    ) -> PagedList<MemberSummary> {
        let today = self.clock.today();
        let total_candidates = candidates.len();
        let gender = filter.effective_gender(requester_gender);

        let age_bounds = if filter.has_default_age_bounds() {
            None
        } else {
            Some(birth_date_bounds(filter.min_age, filter.max_age, today))
        };

        let mut members: Vec<Member> = candidates
            .into_iter()
            .filter(|member| matches_filter(member, filter, gender, likes, age_bounds.as_ref()))
            .collect();

        sort_members(&mut members, filter.sort_key);

        tracing::debug!(
            "Listing for {}: {} of {} candidates kept (gender: {}, ages: {:?})",
            filter.requester_id,
            members.len(),
            total_candidates,
            gender,
            age_bounds
        );

        PagedList::create(
            members,
            filter.page_number() as usize,
            filter.page_size() as usize,
        )
        .map(|member| MemberSummary::from_member(member, today))
    }
}

impl Default for MemberLister {
    fn default() -> Self {
        Self::with_system_clock()
    }
}
