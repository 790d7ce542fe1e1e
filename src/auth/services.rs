use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    password::{hash_password, verify_against_dummy, verify_password},
    repo_types::User,
};
use crate::{error::AppError, state::AppState};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers a new user; `Conflict` when the email is taken.
pub async fn register_user(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(AppError::validation("email", "value is not a valid email address"));
    }
    if password.is_empty() {
        return Err(AppError::validation("password", "must not be empty"));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict("User with this email already exists".into()));
    }

    let hash = hash_password(password).context("hash password")?;
    // A concurrent registration still loses on the unique index and maps to Conflict.
    let user = state.users.create(&email, &hash).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Checks credentials and mints an access token for the user.
///
/// Unknown email and wrong password fail identically, and both run one hash verification.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<String, AppError> {
    let email = normalize_email(username);

    let user = match state.users.find_by_email(&email).await? {
        Some(u) => u,
        None => {
            verify_against_dummy(password);
            warn!("login for unknown email");
            return Err(AppError::BadCredentials);
        }
    };

    if !verify_password(password, &user.password_hash).context("verify password")? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(AppError::BadCredentials);
    }

    let token = state.jwt.sign_access(&user.email).context("sign access token")?;
    info!(user_id = user.id, "user logged in");
    Ok(token)
}
