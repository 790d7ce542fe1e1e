use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{BirthdayQuery, ContactRequest, SearchQuery},
    repo_types::Contact,
    services::upcoming_birthdays,
};
use crate::{
    auth::{guard::ensure_owner, extractors::AuthUser},
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    pagination::Pagination,
    state::AppState,
};

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/search", get(search_contacts))
        .route("/contacts/birthdays", get(birthdays))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

/// Loads a contact and applies the owner check: 404 first, then 403.
async fn owned_contact(state: &AppState, caller: &AuthUser, id: i64) -> Result<Contact, AppError> {
    let contact = state
        .contacts
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Contact"))?;
    ensure_owner(&caller.0, contact.owner_id)?;
    Ok(contact)
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(body): ApiJson<ContactRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Contact>), AppError> {
    let fields = body.into_fields()?;
    let contact = state.contacts.create(user.id, &fields).await?;
    info!(contact_id = contact.id, "contact created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/contacts/{}", contact.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(contact)))
}

#[instrument(skip_all, fields(user_id = user.id, page = p.page, limit = p.limit))]
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<Contact>>, AppError> {
    p.validate()?;
    let contacts = state.contacts.list_by_owner(user.id, p.limit, p.page).await?;
    Ok(Json(contacts))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn search_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let query = q.query.trim();
    if query.is_empty() {
        return Err(AppError::validation("query", "must not be empty"));
    }
    let contacts = state.contacts.search(user.id, query).await?;
    Ok(Json(contacts))
}

#[instrument(skip_all, fields(user_id = user.id, days = q.days))]
pub async fn birthdays(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(q): ApiQuery<BirthdayQuery>,
) -> Result<Json<Vec<Contact>>, AppError> {
    if !(0..=366).contains(&q.days) {
        return Err(AppError::validation("days", "must be between 0 and 366"));
    }
    let today = OffsetDateTime::now_utc().date();
    let contacts = state.contacts.all_by_owner(user.id).await?;
    Ok(Json(upcoming_birthdays(contacts, today, q.days)))
}

#[instrument(skip(state, caller), fields(user_id = caller.0.id))]
pub async fn get_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Contact>, AppError> {
    Ok(Json(owned_contact(&state, &caller, id).await?))
}

#[instrument(skip(state, caller, body), fields(user_id = caller.0.id))]
pub async fn update_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ContactRequest>,
) -> Result<Json<Contact>, AppError> {
    owned_contact(&state, &caller, id).await?;
    let fields = body.into_fields()?;
    let contact = state
        .contacts
        .update(id, &fields)
        .await?
        .ok_or(AppError::NotFound("Contact"))?;
    info!("contact updated");
    Ok(Json(contact))
}

#[instrument(skip(state, caller), fields(user_id = caller.0.id))]
pub async fn delete_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Contact>, AppError> {
    owned_contact(&state, &caller, id).await?;
    let contact = state
        .contacts
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("Contact"))?;
    info!("contact deleted");
    Ok(Json(contact))
}
