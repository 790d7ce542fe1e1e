use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::{jwt::JwtKeys, repo::UserRepo};
use crate::config::{AppConfig, JwtConfig};
use crate::contacts::repo::ContactRepo;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub contacts: Arc<dyn ContactRepo>,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")
    }

    pub fn from_parts(
        users: Arc<dyn UserRepo>,
        contacts: Arc<dyn ContactRepo>,
        jwt: &JwtConfig,
    ) -> Self {
        Self {
            users,
            contacts,
            jwt: Arc::new(JwtKeys::from_config(jwt)),
        }
    }

    pub fn from_pool(db: PgPool, config: &AppConfig) -> Self {
        Self::from_parts(Arc::new(db.clone()), Arc::new(db), &config.jwt)
    }

    /// State over in-memory stores, for router tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::testing::MemoryStore;

        let jwt = JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 30,
        };
        let store = Arc::new(MemoryStore::default());
        Self::from_parts(store.clone(), store, &jwt)
    }
}
