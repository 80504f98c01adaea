use chrono::{DateTime, Utc};

/// Pure user model for the domain layer (no serde/sqlx/protobuf)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Non-null marks the record soft-deleted; such records are hidden
    /// from every read and update path.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// True while the record has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Data for creating a new user; id and timestamps are assigned by the
/// store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub password: String,
}

/// Partial update data for a user; `None` leaves the stored value unchanged
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl UserPatch {
    /// True when no field is set. The update still executes as a no-op.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.last_name.is_none()
            && self.password.is_none()
    }
}
