//! User model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// User entity representing a registered account.
///
/// The password hash never leaves the server: it is skipped during
/// serialization so a `User` can be embedded in a response safely.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Email address (unique)
    pub email: String,
    /// Password hash (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password()`.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: 0, // Will be set by the database
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
