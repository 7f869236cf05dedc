// Core listing exports
pub mod clock;
pub mod filters;
pub mod likes;
pub mod lister;
pub mod paging;
pub mod params;

pub use clock::{calculate_age, Clock, FixedClock, SystemClock};
pub use filters::{birth_date_bounds, matches_filter, sort_members, BirthDateBounds};
pub use likes::{LikeError, LikeGraph};
pub use lister::MemberLister;
pub use paging::{PagedList, PaginationHeader};
pub use params::{
    FilterError, Gender, ListingFilter, RelationshipFilter, SortKey, MAX_PAGE_SIZE,
};
