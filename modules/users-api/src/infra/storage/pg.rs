//! Postgres-backed repository implementation for the domain port.
//!
//! Every statement is assembled with `QueryBuilder` and positional binds,
//! so input values never reach the SQL text. Soft-deleted rows are hidden
//! from every read and update by an explicit `deleted_at IS NULL` filter.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::contract::error::StoreError;
use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::UserRow;
use crate::infra::storage::mapper::row_to_contract;

/// Postgres repository impl. Holds a pool; clones are cheap.
#[derive(Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a single-row statement; zero rows is `NotFound`.
    async fn fetch_user(
        &self,
        mut query: QueryBuilder<'_, Postgres>,
        op: &'static str,
    ) -> Result<User, StoreError> {
        let row = query
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .context(op)?
            .ok_or(StoreError::NotFound)?;
        Ok(row_to_contract(row))
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn get_by_id(&self, id: &str) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_field("id"));
        }

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM users WHERE id = ");
        query.push_bind(id).push(" AND deleted_at IS NULL");

        self.fetch_user(query, "get_by_id failed").await
    }

    async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        if email.is_empty() {
            return Err(StoreError::missing_field("email"));
        }

        // Emails are stored lower-cased, so the key is normalized the
        // same way before matching.
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM users WHERE email = ");
        query
            .push_bind(email.to_lowercase())
            .push(" AND deleted_at IS NULL");

        self.fetch_user(query, "get_by_email failed").await
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        if new_user.email.is_empty() {
            return Err(StoreError::missing_field("email"));
        }

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO users (id, email, name, last_name, password, created_at, updated_at) VALUES (",
        );
        let mut values = query.separated(", ");
        values.push_bind(id);
        values.push_bind(new_user.email.to_lowercase());
        values.push_bind(new_user.name);
        values.push_bind(new_user.last_name);
        values.push_bind(new_user.password);
        values.push_bind(now);
        values.push_bind(now);
        query.push(") RETURNING *");

        self.fetch_user(query, "create failed").await
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_field("id"));
        }

        let query = update_statement(id, patch);
        self.fetch_user(query, "update failed").await
    }

    async fn delete(&self, id: &str) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_field("id"));
        }

        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE users SET deleted_at = ");
        query
            .push_bind(Utc::now())
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND deleted_at IS NULL RETURNING *");

        self.fetch_user(query, "delete failed").await
    }
}

/// Build the partial update. Set fields join the SET clause; an all-`None`
/// patch keeps the statement valid and runs as a no-op.
fn update_statement<'a>(id: &'a str, patch: UserPatch) -> QueryBuilder<'a, Postgres> {
    let no_fields = patch.is_empty();

    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
    let mut fields = query.separated(", ");

    if let Some(email) = patch.email {
        fields
            .push("email = ")
            .push_bind_unseparated(email.to_lowercase());
    }
    if let Some(name) = patch.name {
        fields.push("name = ").push_bind_unseparated(name);
    }
    if let Some(last_name) = patch.last_name {
        fields.push("last_name = ").push_bind_unseparated(last_name);
    }
    if let Some(password) = patch.password {
        fields.push("password = ").push_bind_unseparated(password);
    }
    if no_fields {
        fields.push("id = id");
    }

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND deleted_at IS NULL RETURNING *");

    query
}
