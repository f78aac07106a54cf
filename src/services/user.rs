//! User service
//!
//! Implements business logic for user accounts:
//! - Registration with email and password
//! - Login with credential verification
//! - Access token issuance on both paths

use crate::db::repositories::UserRepository;
use crate::models::User;
use crate::services::auth::TokenManager;
use crate::services::password::{hash_password, verify_password};
use anyhow::Context;
use std::sync::Arc;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Email is already registered
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// User service for registration and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenManager>,
}

impl UserService {
    /// Create a new user service with the given repository and token manager
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: Arc<TokenManager>) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a new user
    ///
    /// Hashes the password, stores the user, and issues an access token for
    /// the new account.
    ///
    /// # Arguments
    ///
    /// * `input` - Registration input containing email and password
    ///
    /// # Returns
    ///
    /// The created user and a fresh access token
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the email or password is malformed
    /// - `EmailTaken` if the email is already registered
    /// - `InternalError` for database or token failures
    pub async fn signup(&self, input: SignupInput) -> Result<(User, String), UserServiceError> {
        // Leading and trailing whitespace never counts as part of credentials
        let email = input.email.trim().to_string();
        let password = input.password.trim();

        validate_email(&email)?;
        validate_password(password)?;

        if self
            .user_repo
            .get_by_email(&email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(UserServiceError::EmailTaken(email));
        }

        let password_hash = hash_password(password).context("Failed to hash password")?;

        let user = self
            .user_repo
            .create(&User::new(email, password_hash))
            .await
            .context("Failed to create user")?;

        let token = self
            .tokens
            .issue(user.id)
            .context("Failed to issue access token")?;

        Ok((user, token))
    }

    /// Login with credentials
    ///
    /// Looks the user up by email and verifies the password against the
    /// stored hash.
    ///
    /// # Arguments
    ///
    /// * `input` - Login input containing email and password
    ///
    /// # Returns
    ///
    /// A fresh access token on success
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the email is unknown or the password is wrong
    /// - `InternalError` for database or token failures
    pub async fn login(&self, input: LoginInput) -> Result<String, UserServiceError> {
        let user = self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to get user by email")?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError("Invalid credentials".to_string())
            })?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            return Err(UserServiceError::AuthenticationError(
                "Invalid credentials".to_string(),
            ));
        }

        let token = self
            .tokens
            .issue(user.id)
            .context("Failed to issue access token")?;

        Ok(token)
    }
}

/// Validate email format
fn validate_email(email: &str) -> Result<(), UserServiceError> {
    if email.is_empty() {
        return Err(UserServiceError::ValidationError(
            "Email cannot be empty".to_string(),
        ));
    }

    let well_formed = email
        .split_once('@')
        .map(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        .unwrap_or(false);

    if !well_formed || email.contains(char::is_whitespace) {
        return Err(UserServiceError::ValidationError(
            "Invalid email format".to_string(),
        ));
    }

    Ok(())
}

/// Validate password requirements
fn validate_password(password: &str) -> Result<(), UserServiceError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserServiceError::ValidationError(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Input for user registration
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
}

impl SignupInput {
    /// Create a new registration input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Input for user login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Create a new login input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
