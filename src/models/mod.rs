// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Like, Member};
pub use requests::{ListMembersQuery, UpdateMemberRequest};
pub use responses::{ErrorResponse, HealthResponse, MemberDetail, MemberSummary};
