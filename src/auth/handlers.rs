use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{PublicUser, RegisterRequest, TokenForm, TokenResponse},
        extractors::AuthUser,
        services,
    },
    error::AppError,
    extract::{ApiForm, ApiJson, ApiQuery},
    pagination::Pagination,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = services::register_user(&state, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, form))]
pub async fn token(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<TokenForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let access_token = services::login(&state, &form.username, &form.password).await?;
    Ok(Json(TokenResponse::bearer(
        access_token,
        state.jwt.access_ttl.as_secs(),
    )))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user.into())
}

#[instrument(skip(state, _caller))]
pub async fn list_users(
    State(state): State<AppState>,
    _caller: AuthUser,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    p.validate()?;
    let users = state.users.list(p.limit, p.page).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
