//! Data models
//!
//! Database entities shared across the repository, service, and API layers.

mod post;
mod user;

pub use post::Post;
pub use user::User;
