//! Post service
//!
//! Implements business logic for post management:
//! - Post creation with write-through updates of cached lists
//! - Per-user post listing served from cache when possible
//! - Post deletion with cache eviction

use crate::cache::MemoryCache;
use crate::db::repositories::PostRepository;
use crate::models::Post;
use anyhow::Context;
use std::sync::Arc;

/// Cache key prefix for per-user post lists
const CACHE_KEY_USER_POSTS: &str = "posts:user:";

/// Error types for post service operations
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    /// The user has no posts
    #[error("No posts found")]
    NoPosts,

    /// Post missing or owned by someone else
    #[error("Post not found or not owned by the user")]
    NotFound,

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Post service for managing user posts
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    cache: Arc<MemoryCache>,
}

impl PostService {
    /// Create a new post service with the given repository and cache
    pub fn new(repo: Arc<dyn PostRepository>, cache: Arc<MemoryCache>) -> Self {
        Self { repo, cache }
    }

    /// Create a new post for a user
    ///
    /// If the user's post list is already cached, the new post is appended
    /// to it so subsequent reads stay consistent without a database round
    /// trip.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the text is empty after trimming
    /// - `InternalError` for database errors
    pub async fn create(&self, owner_id: i64, text: &str) -> Result<Post, PostServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PostServiceError::ValidationError(
                "Post text cannot be empty".to_string(),
            ));
        }

        let post = self
            .repo
            .create(&Post::new(text.to_string(), owner_id))
            .await
            .context("Failed to create post")?;

        // Extend the cached list in place if one exists
        let cache_key = format!("{}{}", CACHE_KEY_USER_POSTS, owner_id);
        if let Some(mut posts) = self.cache.get::<Vec<Post>>(&cache_key).await.ok().flatten() {
            if !posts.is_empty() {
                posts.push(post.clone());
                let _ = self.cache.set(&cache_key, &posts).await;
            }
        }

        Ok(post)
    }

    /// List all posts owned by a user
    ///
    /// Serves the list from cache when a non-empty entry exists, otherwise
    /// reads from the database and caches the result.
    ///
    /// # Errors
    ///
    /// - `NoPosts` if the user has no posts
    /// - `InternalError` for database errors
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Post>, PostServiceError> {
        // Try cache first
        let cache_key = format!("{}{}", CACHE_KEY_USER_POSTS, owner_id);
        if let Some(posts) = self.cache.get::<Vec<Post>>(&cache_key).await.ok().flatten() {
            if !posts.is_empty() {
                return Ok(posts);
            }
        }

        let posts = self
            .repo
            .list_by_owner(owner_id)
            .await
            .context("Failed to list posts")?;

        if posts.is_empty() {
            return Err(PostServiceError::NoPosts);
        }

        let _ = self.cache.set(&cache_key, &posts).await;

        Ok(posts)
    }

    /// Delete a post owned by a user
    ///
    /// The post is removed from the database and filtered out of the
    /// user's cached list if one exists.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the post does not exist or belongs to another user
    /// - `InternalError` for database errors
    pub async fn delete(&self, post_id: i64, owner_id: i64) -> Result<(), PostServiceError> {
        let deleted = self
            .repo
            .delete_owned(post_id, owner_id)
            .await
            .context("Failed to delete post")?;

        if !deleted {
            return Err(PostServiceError::NotFound);
        }

        let cache_key = format!("{}{}", CACHE_KEY_USER_POSTS, owner_id);
        if let Some(posts) = self.cache.get::<Vec<Post>>(&cache_key).await.ok().flatten() {
            if !posts.is_empty() {
                let remaining: Vec<Post> =
                    posts.into_iter().filter(|p| p.id != post_id).collect();
                let _ = self.cache.set(&cache_key, &remaining).await;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::memory::InMemoryPostRepository;
    use std::time::Duration;

    fn setup_test_service() -> (Arc<InMemoryPostRepository>, Arc<MemoryCache>, PostService) {
        let repo = Arc::new(InMemoryPostRepository::new());
        let cache = Arc::new(MemoryCache::with_capacity_and_ttl(
            100,
            Duration::from_secs(300),
        ));
        let service = PostService::new(repo.clone(), cache.clone());

        (repo, cache, service)
    }

    // ========================================================================
    // Creation tests
    // ========================================================================

    #[tokio::test]
    async fn test_create_persists_post() {
        let (_repo, _cache, service) = setup_test_service();

        let post = service.create(1, "hello world").await.expect("Failed to create post");

        assert!(post.id > 0);
        assert_eq!(post.text, "hello world");
        assert_eq!(post.owner_id, 1);
    }

    #[tokio::test]
    async fn test_create_trims_text() {
        let (_repo, _cache, service) = setup_test_service();

        let post = service.create(1, "  hello  ").await.expect("Failed to create post");

        assert_eq!(post.text, "hello");
    }

    #[tokio::test]
    async fn test_create_empty_text_fails() {
        let (_repo, _cache, service) = setup_test_service();

        for text in ["", "   ", "\n\t"] {
            let result = service.create(1, text).await;
            assert!(
                matches!(result, Err(PostServiceError::ValidationError(_))),
                "Text {:?} should be rejected",
                text
            );
        }
    }

    #[tokio::test]
    async fn test_create_does_not_prime_cold_cache() {
        let (_repo, cache, service) = setup_test_service();

        service.create(1, "first").await.expect("Failed to create post");

        let cached = cache
            .get::<Vec<Post>>("posts:user:1")
            .await
            .expect("Cache read should not error");
        assert!(cached.is_none(), "Creating a post must not seed the cache");
    }

    // ========================================================================
    // Listing tests
    // ========================================================================

    #[tokio::test]
    async fn test_list_returns_posts_in_insertion_order() {
        let (_repo, _cache, service) = setup_test_service();

        let first = service.create(1, "first").await.expect("Failed to create post");
        let second = service.create(1, "second").await.expect("Failed to create post");

        let posts = service.list_for_owner(1).await.expect("Failed to list posts");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, first.id);
        assert_eq!(posts[1].id, second.id);
    }

    #[tokio::test]
    async fn test_list_without_posts_fails() {
        let (_repo, _cache, service) = setup_test_service();

        let result = service.list_for_owner(42).await;
        assert!(matches!(result, Err(PostServiceError::NoPosts)));
    }

    #[tokio::test]
    async fn test_list_is_served_from_cache() {
        let (repo, _cache, service) = setup_test_service();

        service.create(1, "hello").await.expect("Failed to create post");

        service.list_for_owner(1).await.expect("Failed to list posts");
        service.list_for_owner(1).await.expect("Failed to list posts");

        assert_eq!(repo.list_calls(), 1, "Second list should hit the cache");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let (_repo, _cache, service) = setup_test_service();

        service.create(1, "mine").await.expect("Failed to create post");
        service.create(2, "theirs").await.expect("Failed to create post");

        let posts = service.list_for_owner(1).await.expect("Failed to list posts");

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "mine");
    }

    #[tokio::test]
    async fn test_create_appends_to_cached_list() {
        let (repo, _cache, service) = setup_test_service();

        service.create(1, "first").await.expect("Failed to create post");
        service.list_for_owner(1).await.expect("Failed to list posts");

        // The cached list is extended, so the next read needs no database hit
        let second = service.create(1, "second").await.expect("Failed to create post");
        let posts = service.list_for_owner(1).await.expect("Failed to list posts");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, second.id);
        assert_eq!(repo.list_calls(), 1);
    }

    // ========================================================================
    // Deletion tests
    // ========================================================================

    #[tokio::test]
    async fn test_delete_removes_post() {
        let (_repo, _cache, service) = setup_test_service();

        let post = service.create(1, "hello").await.expect("Failed to create post");
        service.delete(post.id, 1).await.expect("Failed to delete post");

        let result = service.list_for_owner(1).await;
        assert!(matches!(result, Err(PostServiceError::NoPosts)));
    }

    #[tokio::test]
    async fn test_delete_missing_post_fails() {
        let (_repo, _cache, service) = setup_test_service();

        let result = service.delete(999, 1).await;
        assert!(matches!(result, Err(PostServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_other_users_post_fails() {
        let (_repo, _cache, service) = setup_test_service();

        let post = service.create(1, "mine").await.expect("Failed to create post");

        let result = service.delete(post.id, 2).await;
        assert!(matches!(result, Err(PostServiceError::NotFound)));

        // The post must survive the failed delete
        let posts = service.list_for_owner(1).await.expect("Failed to list posts");
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_evicts_from_cached_list() {
        let (repo, _cache, service) = setup_test_service();

        let first = service.create(1, "first").await.expect("Failed to create post");
        let second = service.create(1, "second").await.expect("Failed to create post");
        service.list_for_owner(1).await.expect("Failed to list posts");

        service.delete(first.id, 1).await.expect("Failed to delete post");

        let posts = service.list_for_owner(1).await.expect("Failed to list posts");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, second.id);
        assert_eq!(repo.list_calls(), 1, "Filtered list should still be served from cache");
    }

    #[tokio::test]
    async fn test_delete_last_post_falls_back_to_database() {
        let (repo, _cache, service) = setup_test_service();

        let post = service.create(1, "only").await.expect("Failed to create post");
        service.list_for_owner(1).await.expect("Failed to list posts");

        service.delete(post.id, 1).await.expect("Failed to delete post");

        // The cached list is now empty, which is not treated as a hit
        let result = service.list_for_owner(1).await;
        assert!(matches!(result, Err(PostServiceError::NoPosts)));
        assert_eq!(repo.list_calls(), 2);
    }
}
