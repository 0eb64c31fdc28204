//! Repository implementations

mod error;
mod message;
mod user;

pub use message::PgMessageRepository;
pub use user::PgUserRepository;
