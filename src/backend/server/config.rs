//! Server Configuration
//!
//! Loads optional services from environment variables. Configuration errors
//! are logged but do not prevent startup; a service that fails to initialize
//! is `None` and the server runs without it.

use sqlx::PgPool;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Returns `None` if
/// the variable is unset or the connection fails; the server then runs
/// without persistence and handlers report server errors.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => {
            // Migrations may have been applied already by another instance.
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Allowed CORS origin for the HTTP surface
///
/// Defaults to the local client origin when `CORS_ORIGIN` is unset.
pub fn cors_origin() -> String {
    std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string())
}
