use crate::contract::model::User;
use crate::infra::storage::entity::UserRow;

/// Convert a database row to a contract model
pub fn row_to_contract(row: UserRow) -> User {
    User {
        id: row.id,
        email: row.email,
        name: row.name,
        last_name: row.last_name,
        password: row.password,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }
}
