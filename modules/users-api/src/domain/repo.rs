use async_trait::async_trait;

use crate::contract::error::StoreError;
use crate::contract::model::{NewUser, User, UserPatch};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a non-deleted user by id.
    async fn get_by_id(&self, id: &str) -> Result<User, StoreError>;
    /// Load a non-deleted user by email. The lookup key is matched
    /// lower-cased, the same normalization applied on insert.
    async fn get_by_email(&self, email: &str) -> Result<User, StoreError>;
    /// Insert a new user; the store assigns id and timestamps and returns
    /// the persisted record.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
    /// Apply the set patch fields to a non-deleted user and return the
    /// merged record. An all-`None` patch still executes as a no-op.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, StoreError>;
    /// Mark a non-deleted user deleted. Deleting a missing or already
    /// deleted id is `NotFound`.
    async fn delete(&self, id: &str) -> Result<User, StoreError>;
}
