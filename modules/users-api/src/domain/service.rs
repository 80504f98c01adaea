use std::sync::Arc;

use tracing::instrument;

use crate::contract::error::StoreError;
use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::repo::UsersRepository;

/// Domain service for user management.
///
/// Pure delegation to the repository port: no added validation and no
/// transformation, so the storage layer can be swapped out behind it.
/// Depends only on the port, not on infra types.
#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "users.service.get_by_id", skip(self), fields(user_id = %id))]
    pub async fn get_by_id(&self, id: &str) -> Result<User, StoreError> {
        self.repo.get_by_id(id).await
    }

    #[instrument(name = "users.service.get_by_email", skip(self), fields(email = %email))]
    pub async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.repo.get_by_email(email).await
    }

    #[instrument(
        name = "users.service.create",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.repo.create(new_user).await
    }

    #[instrument(name = "users.service.update", skip(self, patch), fields(user_id = %id))]
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<User, StoreError> {
        self.repo.update(id, patch).await
    }

    #[instrument(name = "users.service.delete", skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<User, StoreError> {
        self.repo.delete(id).await
    }
}
