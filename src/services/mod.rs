//! Services layer - Business logic
//!
//! This module contains all business logic services for the posts API.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories and cache
//! - Handling validation and error cases

pub mod auth;
pub mod password;
pub mod post;
pub mod user;

pub use auth::{AuthError, Claims, TokenManager};
pub use password::{hash_password, verify_password};
pub use post::{PostService, PostServiceError};
pub use user::{LoginInput, SignupInput, UserService, UserServiceError};
