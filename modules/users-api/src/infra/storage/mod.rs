pub mod entity;
pub mod mapper;
pub mod pg;

pub use pg::PgUsersRepository;
