use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Contact, ContactFields};
use crate::error::RepoError;

#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn create(&self, owner_id: i64, fields: &ContactFields) -> Result<Contact, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<Contact>, RepoError>;

    async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contact>, RepoError>;

    /// Every contact of the owner, for in-process date filtering.
    async fn all_by_owner(&self, owner_id: i64) -> Result<Vec<Contact>, RepoError>;

    /// Case-insensitive substring match on first name, last name or email.
    async fn search(&self, owner_id: i64, query: &str) -> Result<Vec<Contact>, RepoError>;

    async fn update(&self, id: i64, fields: &ContactFields) -> Result<Option<Contact>, RepoError>;

    async fn delete(&self, id: i64) -> Result<Option<Contact>, RepoError>;
}

const COLUMNS: &str =
    "id, owner_id, first_name, last_name, email, phone, birthday, additional_info, created_at";

fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ContactRepo for PgPool {
    async fn create(&self, owner_id: i64, fields: &ContactFields) -> Result<Contact, RepoError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            INSERT INTO contacts (owner_id, first_name, last_name, email, phone, birthday, additional_info)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.birthday)
        .bind(&fields.additional_info)
        .fetch_one(self)
        .await?;
        Ok(contact)
    }

    async fn get(&self, id: i64) -> Result<Option<Contact>, RepoError> {
        let contact =
            sqlx::query_as::<_, Contact>(&format!("SELECT {COLUMNS} FROM contacts WHERE id = $1"))
                .bind(id)
                .fetch_optional(self)
                .await?;
        Ok(contact)
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contact>, RepoError> {
        let rows = sqlx::query_as::<_, Contact>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM contacts
            WHERE owner_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn all_by_owner(&self, owner_id: i64) -> Result<Vec<Contact>, RepoError> {
        let rows = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {COLUMNS} FROM contacts WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn search(&self, owner_id: i64, query: &str) -> Result<Vec<Contact>, RepoError> {
        let rows = sqlx::query_as::<_, Contact>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM contacts
            WHERE owner_id = $1
              AND (first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
            ORDER BY id
            "#
        ))
        .bind(owner_id)
        .bind(like_pattern(query))
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, fields: &ContactFields) -> Result<Option<Contact>, RepoError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            UPDATE contacts
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                birthday = $6, additional_info = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.birthday)
        .bind(&fields.additional_info)
        .fetch_optional(self)
        .await?;
        Ok(contact)
    }

    async fn delete(&self, id: i64) -> Result<Option<Contact>, RepoError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "DELETE FROM contacts WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(contact)
    }
}
