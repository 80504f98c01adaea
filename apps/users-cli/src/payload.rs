//! JSON shapes the CLI reads from its argument and writes to stdout.
//!
//! Inputs follow Go-style zero-value semantics: a missing key becomes an
//! empty string and the server rejects it with a validation error, so the
//! CLI never has to duplicate those checks. The update payload is the
//! exception: only keys present in the JSON are sent as set fields.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use users_proto::proto::users::v1 as proto;

/// Parse the positional JSON argument.
pub(crate) fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|_| anyhow!("invalid JSON"))
}

/// `{"id": "..."}` for getById and delete.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdPayload {
    #[serde(default)]
    pub id: String,
}

/// `{"email": "..."}` for getByEmail.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmailPayload {
    #[serde(default)]
    pub email: String,
}

/// `{"user": {...}}` envelope for create.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserEnvelope {
    #[serde(default)]
    pub user: NewUserPayload,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewUserPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl From<NewUserPayload> for proto::User {
    fn from(p: NewUserPayload) -> Self {
        proto::User {
            email: p.email,
            name: p.name,
            last_name: p.last_name,
            password: p.password,
            ..Default::default()
        }
    }
}

/// `{"user": {...}}` envelope for update.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PatchEnvelope {
    #[serde(default)]
    pub user: UserPatchPayload,
}

/// Update patch: keys absent from the JSON stay untouched on the server.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserPatchPayload {
    #[serde(default)]
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl From<UserPatchPayload> for proto::UpdateUserRequest {
    fn from(p: UserPatchPayload) -> Self {
        proto::UpdateUserRequest {
            id: p.id,
            email: p.email,
            name: p.name,
            last_name: p.last_name,
            password: p.password,
        }
    }
}

/// Successful payload printed to stdout, timestamps in Unix seconds.
#[derive(Debug, Serialize)]
pub(crate) struct UserJson {
    pub id: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub password: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<proto::User> for UserJson {
    fn from(u: proto::User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            last_name: u.last_name,
            password: u.password,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
