//! Postline - A minimal post board service

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postline::{
    api::{self, middleware::RequestStats, AppState},
    cache::create_cache,
    config::Config,
    db::{
        self,
        repositories::{SqlxPostRepository, SqlxUserRepository},
    },
    services::{auth::TokenManager, post::PostService, user::UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postline=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Postline...");

    // Load configuration
    let config_path = std::env::var("POSTLINE_CONFIG").unwrap_or_else(|_| "config.yml".to_string());
    let config = Config::load_with_env(Path::new(&config_path))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected");

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize cache
    let cache = create_cache(&config.cache);
    tracing::info!(
        "Post cache initialized (capacity {}, ttl {}s)",
        config.cache.capacity,
        config.cache.ttl_seconds
    );

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let post_repo = SqlxPostRepository::boxed(pool.clone());

    // Initialize services
    let tokens = Arc::new(TokenManager::new(
        &config.auth.secret,
        config.auth.token_ttl_minutes,
    ));
    let user_service = Arc::new(UserService::new(user_repo, tokens.clone()));
    let post_service = Arc::new(PostService::new(post_repo, cache));

    // Build application state
    let state = AppState {
        pool: pool.clone(),
        user_service,
        post_service,
        tokens,
        request_stats: Arc::new(RequestStats::new()),
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API docs available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
