//! Domain entities

mod message;
mod user;

pub use message::DirectMessage;
pub use user::User;
