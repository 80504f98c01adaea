use users_proto::proto::users::v1 as proto;

use crate::contract::error::StoreError;

/// Response-embedded error codes, following HTTP conventions.
pub const CODE_VALIDATION: i32 = 400;
pub const CODE_NOT_FOUND: i32 = 404;
pub const CODE_CONFLICT: i32 = 409;
pub const CODE_INTERNAL: i32 = 500;

pub fn validation(message: impl Into<String>) -> proto::Error {
    proto::Error {
        code: CODE_VALIDATION,
        message: message.into(),
    }
}

pub fn not_found(message: impl Into<String>) -> proto::Error {
    proto::Error {
        code: CODE_NOT_FOUND,
        message: message.into(),
    }
}

pub fn conflict(message: impl Into<String>) -> proto::Error {
    proto::Error {
        code: CODE_CONFLICT,
        message: message.into(),
    }
}

pub fn internal(message: impl Into<String>) -> proto::Error {
    proto::Error {
        code: CODE_INTERNAL,
        message: message.into(),
    }
}

/// Sole translation point from store errors to response-embedded errors.
/// Classifies by variant; `not_found_message` supplies the per-operation
/// wording for missing records.
pub fn map_store_error(err: &StoreError, not_found_message: String) -> proto::Error {
    match err {
        StoreError::MissingField { .. } => validation(err.to_string()),
        StoreError::NotFound => not_found(not_found_message),
        StoreError::Database(e) => internal(e.to_string()),
    }
}
