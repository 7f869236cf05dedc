use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::auth::Requester;
use crate::core::{LikeGraph, PaginationHeader};
use crate::models::{Like, ListMembersQuery, Member, MemberDetail, UpdateMemberRequest};
use crate::routes::errors::ApiError;
use crate::routes::AppState;
use crate::services::MemberStore;

/// Configure all member routes
pub fn configure<S: MemberStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users", web::get().to(list_members::<S>))
        .route("/users/{id}", web::get().to(get_member::<S>))
        .route("/users/{id}", web::put().to(update_member::<S>))
        .route("/users/{id}/like/{recipient_id}", web::post().to(like_member::<S>));
}

/// List members
///
/// GET /api/users?pageNumber=1&pageSize=10&gender=female&minAge=18&maxAge=99&orderBy=lastActive&likers=false&likees=false
///
/// The body is the array of members on the requested page. Paging totals
/// travel in the `Pagination` header:
/// ```json
/// {"currentPage":1,"pageSize":10,"totalItems":12,"totalPages":2}
/// ```
async fn list_members<S: MemberStore>(
    state: web::Data<AppState<S>>,
    requester: Requester,
    query: web::Query<ListMembersQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for list_members: {:?}", errors);
        return Err(errors.into());
    }

    let member = load_requester(&state, requester).await?;
    let filter = query.into_filter(requester.id)?;

    let gender = filter.effective_gender(member.gender);
    let candidates = state.store.list_members(gender).await?;
    let likes: LikeGraph = state
        .store
        .likes_involving(requester.id)
        .await?
        .into_iter()
        .collect();

    let (members, pagination) = state
        .lister
        .list(&filter, member.gender, candidates, &likes)
        .into_parts();

    tracing::info!(
        "Returning page {}/{} ({} members of {}) for member {}",
        pagination.current_page,
        pagination.total_pages,
        members.len(),
        pagination.total_items,
        requester.id
    );

    record_activity(&state, requester).await;

    Ok(HttpResponse::Ok()
        .insert_header((PaginationHeader::NAME, pagination.to_header_value()?))
        .insert_header((header::ACCESS_CONTROL_EXPOSE_HEADERS, PaginationHeader::NAME))
        .json(members))
}

/// Get one member
///
/// GET /api/users/{id}
async fn get_member<S: MemberStore>(
    state: web::Data<AppState<S>>,
    requester: Requester,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let member = state
        .store
        .get_member(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Member {} not found", id)))?;

    record_activity(&state, requester).await;

    let today = state.lister.clock().today();
    Ok(HttpResponse::Ok().json(MemberDetail::from_member(member, today)))
}

/// Update the requester's own profile
///
/// PUT /api/users/{id}
///
/// Replies 204 with no body.
async fn update_member<S: MemberStore>(
    state: web::Data<AppState<S>>,
    requester: Requester,
    path: web::Path<i32>,
    body: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if id != requester.id {
        return Err(ApiError::Unauthorized(
            "You can only update your own profile".to_string(),
        ));
    }

    let update = body.into_inner();
    if let Err(errors) = update.validate() {
        tracing::info!("Validation failed for update_member: {:?}", errors);
        return Err(errors.into());
    }

    state.store.update_member(id, &update).await?;

    tracing::info!("Member {} updated their profile", id);

    record_activity(&state, requester).await;

    Ok(HttpResponse::NoContent().finish())
}

/// Like another member
///
/// POST /api/users/{id}/like/{recipientId}
///
/// `id` must be the requester. Liking yourself or liking the same member
/// twice is a bad request; an unknown recipient is not found.
async fn like_member<S: MemberStore>(
    state: web::Data<AppState<S>>,
    requester: Requester,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, ApiError> {
    let (id, recipient_id) = path.into_inner();

    if id != requester.id {
        return Err(ApiError::Unauthorized(
            "You can only like members as yourself".to_string(),
        ));
    }

    let like = Like::new(id, recipient_id);
    let mut likes: LikeGraph = state.store.likes_involving(id).await?.into_iter().collect();
    likes.insert(like)?;

    if state.store.get_member(recipient_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Member {} not found", recipient_id)));
    }

    state.store.add_like(like).await?;

    tracing::info!("Member {} liked member {}", id, recipient_id);

    record_activity(&state, requester).await;

    Ok(HttpResponse::Ok().finish())
}

async fn load_requester<S: MemberStore>(
    state: &AppState<S>,
    requester: Requester,
) -> Result<Member, ApiError> {
    state
        .store
        .get_member(requester.id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(format!("Unknown member {}", requester.id)))
}

/// Stamp the requester's last activity; failures only degrade sorting
async fn record_activity<S: MemberStore>(state: &AppState<S>, requester: Requester) {
    let now = state.lister.clock().now();
    if let Err(e) = state.store.touch_last_active(requester.id, now).await {
        tracing::warn!("Failed to record activity for member {}: {}", requester.id, e);
    }
}
