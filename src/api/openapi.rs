//! OpenAPI specification generated from handler annotations via utoipa.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Top-level OpenAPI document for the Postline API.
///
/// Each handler module contributes its own paths and schemas via per-module
/// `#[derive(OpenApi)]` structs that are merged into this root document at
/// startup.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postline API",
        description = "Post board API with JWT authentication and per-user post caching.",
        version = "0.1.0",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Signup and login"),
        (name = "posts", description = "Post creation, listing and deletion"),
        (name = "health", description = "Health and request statistics"),
    ),
    components(schemas(ErrorResponse, ErrorBody))
)]
pub struct ApiDoc;

/// Standard error envelope returned by all endpoints on failure.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error detail inside the envelope.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g. "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Adds Bearer JWT security scheme to the OpenAPI spec.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the merged OpenAPI document from all handler modules.
pub fn build_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    // Merge per-module OpenAPI structs as they are annotated.
    // Each module defines its own XxxApiDoc that lists its paths and schemas.
    doc.merge(super::users::UsersApiDoc::openapi());
    doc.merge(super::posts::PostsApiDoc::openapi());
    doc.merge(super::health::HealthApiDoc::openapi());

    doc
}
