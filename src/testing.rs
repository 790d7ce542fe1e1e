//! In-memory user and contact stores backing router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::{repo::UserRepo, repo_types::User};
use crate::contacts::{
    repo::ContactRepo,
    repo_types::{Contact, ContactFields},
};
use crate::error::RepoError;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    contacts: Mutex<Vec<Contact>>,
}

fn page<T: Clone>(rows: impl Iterator<Item = T>, limit: i64, offset: i64) -> Vec<T> {
    rows.skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(RepoError::EmailTaken);
        }
        let user = User {
            id: users.len() as i64 + 1,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(page(users.iter().cloned(), limit, offset))
    }
}

#[async_trait]
impl ContactRepo for MemoryStore {
    async fn create(&self, owner_id: i64, fields: &ContactFields) -> Result<Contact, RepoError> {
        let mut contacts = self.contacts.lock().unwrap();
        let id = contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let contact = Contact {
            id,
            owner_id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            birthday: fields.birthday,
            additional_info: fields.additional_info.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn get(&self, id: i64) -> Result<Option<Contact>, RepoError> {
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contact>, RepoError> {
        let contacts = self.contacts.lock().unwrap();
        let owned = contacts.iter().filter(|c| c.owner_id == owner_id).cloned();
        Ok(page(owned, limit, offset))
    }

    async fn all_by_owner(&self, owner_id: i64) -> Result<Vec<Contact>, RepoError> {
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().filter(|c| c.owner_id == owner_id).cloned().collect())
    }

    async fn search(&self, owner_id: i64, query: &str) -> Result<Vec<Contact>, RepoError> {
        let needle = query.to_lowercase();
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .filter(|c| {
                [&c.first_name, &c.last_name, &c.email]
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, fields: &ContactFields) -> Result<Option<Contact>, RepoError> {
        let mut contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter_mut().find(|c| c.id == id).map(|c| {
            c.first_name = fields.first_name.clone();
            c.last_name = fields.last_name.clone();
            c.email = fields.email.clone();
            c.phone = fields.phone.clone();
            c.birthday = fields.birthday;
            c.additional_info = fields.additional_info.clone();
            c.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Contact>, RepoError> {
        let mut contacts = self.contacts.lock().unwrap();
        let pos = contacts.iter().position(|c| c.id == id);
        Ok(pos.map(|i| contacts.remove(i)))
    }
}
