use users_proto::proto::users::v1 as proto;

use crate::contract::model::{NewUser, User, UserPatch};

// Conversion implementations between wire messages and contract models.
// Timestamps cross the wire as Unix seconds; deleted_at never leaves the
// storage layer.

impl From<User> for proto::User {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            last_name: user.last_name,
            password: user.password,
            created_at: user.created_at.timestamp(),
            updated_at: user.updated_at.timestamp(),
        }
    }
}

impl From<proto::User> for NewUser {
    fn from(data: proto::User) -> Self {
        Self {
            email: data.email,
            name: data.name,
            last_name: data.last_name,
            password: data.password,
        }
    }
}

impl From<proto::UpdateUserRequest> for UserPatch {
    fn from(req: proto::UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}
