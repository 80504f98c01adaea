pub mod error;
pub mod model;

pub use error::StoreError;
pub use model::{NewUser, User, UserPatch};
