//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Post entity. Whole post lists are stored in the cache as JSON, so the
/// serde representation must round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique identifier
    pub id: i64,
    /// Post body
    pub text: String,
    /// Id of the user who created the post
    pub owner_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post owned by the given user.
    pub fn new(text: String, owner_id: i64) -> Self {
        Self {
            id: 0, // Will be set by the database
            text,
            owner_id,
            created_at: Utc::now(),
        }
    }
}
