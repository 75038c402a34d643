// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup the PostgreSQL pool, retrying while the server comes up

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Delay before the given retry (1-based): base, 2*base, 4*base, ...
pub fn retry_delay(base_secs: u64, attempt: u32) -> Duration {
    let factor = 1u64 << attempt.saturating_sub(1).min(6);
    Duration::from_secs(base_secs.saturating_mul(factor))
}

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Called once during application startup in main.rs.
/// The pool re-establishes dropped connections on its own afterwards.
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool");

    let mut attempt = 0;
    loop {
        attempt += 1;
        match connect(config).await {
            Ok(pool) => {
                log::info!("Database pool initialized successfully");
                return Ok(pool);
            }
            Err(e) if attempt <= config.db_connect_retries => {
                let delay = retry_delay(config.db_retry_delay, attempt);
                log::warn!(
                    "Database connection attempt {} failed: {} (retrying in {:?})",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        // Checked-out connections are pinged first so a broken one is replaced
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles() {
        assert_eq!(retry_delay(5, 1), Duration::from_secs(5));
        assert_eq!(retry_delay(5, 2), Duration::from_secs(10));
        assert_eq!(retry_delay(5, 3), Duration::from_secs(20));
    }

    #[test]
    fn test_retry_delay_is_capped() {
        assert_eq!(retry_delay(1, 50), Duration::from_secs(64));
    }
}
