//! In-memory repository implementations for tests
//!
//! Back the repository traits with plain vectors so services and routers can
//! be exercised without PostgreSQL. `InMemoryPostRepository` counts `list`
//! calls so tests can assert whether a read hit the cache or the repository.

use super::{PostRepository, UserRepository};
use crate::models::{Post, User};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Vec-backed user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            bail!("unique constraint violation: users.email");
        }

        let mut created = user.clone();
        created.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        users.push(created.clone());
        Ok(created)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

/// Vec-backed post repository with a `list` call counter
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `list_by_owner` has been called
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<Post> {
        let mut posts = self.posts.lock().unwrap();
        let mut created = post.clone();
        created.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        posts.push(created.clone());
        Ok(created)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Post>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_owned(&self, post_id: i64, owner_id: i64) -> Result<bool> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| !(p.id == post_id && p.owner_id == owner_id));
        Ok(posts.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_repository_assigns_ids() {
        let repo = InMemoryUserRepository::new();

        let a = repo
            .create(&User::new("a@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let b = repo
            .create(&User::new("b@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_user_repository_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("dup@example.com".to_string(), "hash".to_string());

        repo.create(&user).await.unwrap();
        assert!(repo.create(&user).await.is_err());
    }

    #[tokio::test]
    async fn test_post_repository_scopes_by_owner() {
        let repo = InMemoryPostRepository::new();

        repo.create(&Post::new("mine".to_string(), 1)).await.unwrap();
        repo.create(&Post::new("theirs".to_string(), 2)).await.unwrap();

        let posts = repo.list_by_owner(1).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "mine");
        assert_eq!(repo.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_post_repository_delete_owned() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(&Post::new("mine".to_string(), 1)).await.unwrap();

        assert!(!repo.delete_owned(post.id, 2).await.unwrap());
        assert!(repo.delete_owned(post.id, 1).await.unwrap());
        assert!(!repo.delete_owned(post.id, 1).await.unwrap());
    }
}
