//! Post repository
//!
//! Database operations for posts:
//! - `PostRepository` trait defining the interface for post data access
//! - `SqlxPostRepository` implementing the trait for PostgreSQL

use crate::models::Post;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a new post
    async fn create(&self, post: &Post) -> Result<Post>;

    /// List all posts owned by a user, oldest first
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Post>>;

    /// Delete a post if it exists and is owned by the user
    ///
    /// Returns `true` when a row was deleted.
    async fn delete_owned(&self, post_id: i64, owner_id: i64) -> Result<bool>;
}

/// SQLx-based post repository implementation
pub struct SqlxPostRepository {
    pool: PgPool,
}

impl SqlxPostRepository {
    /// Create a new SQLx post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: PgPool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: &Post) -> Result<Post> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (text, owner_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, text, owner_id, created_at
            "#,
        )
        .bind(&post.text)
        .bind(post.owner_id)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create post")?;

        Ok(created)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, text, owner_id, created_at
            FROM posts
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts")?;

        Ok(posts)
    }

    async fn delete_owned(&self, post_id: i64, owner_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND owner_id = $2")
            .bind(post_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;

        Ok(result.rows_affected() > 0)
    }
}
