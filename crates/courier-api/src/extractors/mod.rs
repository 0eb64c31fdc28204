//! Request extractors

mod auth;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use validated::ValidatedJson;
