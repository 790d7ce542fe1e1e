use serde::Deserialize;
use time::Date;

use super::repo_types::ContactFields;
use crate::{auth::services::is_valid_email, error::AppError};

const MAX_NAME_LEN: usize = 50;
const MAX_INFO_LEN: usize = 500;

/// Body of `POST /contacts` and `PUT /contacts/:id`.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: Date,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl ContactRequest {
    /// Validates and trims the request into storable fields.
    pub fn into_fields(self) -> Result<ContactFields, AppError> {
        let first_name = required("first_name", &self.first_name, MAX_NAME_LEN)?;
        let last_name = required("last_name", &self.last_name, MAX_NAME_LEN)?;

        let email = self.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::validation("email", "value is not a valid email address"));
        }

        let phone = self.phone.trim().to_owned();
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let allowed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
        if !allowed || !(7..=15).contains(&digits) {
            return Err(AppError::validation(
                "phone",
                "must contain 7 to 15 digits and only + - ( ) or spaces",
            ));
        }

        let additional_info = match self.additional_info.map(|s| s.trim().to_owned()) {
            Some(s) if s.is_empty() => None,
            Some(s) if s.chars().count() > MAX_INFO_LEN => {
                return Err(AppError::validation(
                    "additional_info",
                    format!("must be at most {MAX_INFO_LEN} characters"),
                ))
            }
            other => other,
        };

        Ok(ContactFields {
            first_name,
            last_name,
            email,
            phone,
            birthday: self.birthday,
            additional_info,
        })
    }
}

fn required(field: &'static str, value: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, "must not be empty"));
    }
    if value.chars().count() > max {
        return Err(AppError::validation(field, format!("must be at most {max} characters")));
    }
    Ok(value.to_owned())
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct BirthdayQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    7
}
