// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, storage, TLS, and start HTTPS server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::{tls, Config, StorageBackend};
use db::{MemoryRepository, PgRepository, Repository};
use dotenv::dotenv;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var(
            "RUST_LOG",
            format!("{},actix_web=info,sqlx=warn", config.log_level),
        );
    }
    env_logger::init();

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    log::info!("Starting gallery-api...");
    log::info!("Environment: {}", config.environment.as_str());
    log::info!("Server Address: {}", config.bind_address());

    // 4. Initialize the document store
    let repo: Arc<dyn Repository> = match config.storage {
        StorageBackend::Postgres => {
            let pool = config::init_db_pool(&config)
                .await
                .context("Failed to connect to database")?;
            let pg = PgRepository::new(pool);
            pg.ensure_schema().await?;
            Arc::new(pg)
        }
        StorageBackend::Memory => {
            log::info!("Using in-memory document store");
            Arc::new(MemoryRepository::new())
        }
    };

    // 5. Load or create TLS material
    let material = tls::load_or_generate(&config.cert_dir)?;
    let acceptor = tls::acceptor(&material)?;

    // 6. Start HTTPS server
    let repo_data: web::Data<dyn Repository> = web::Data::from(repo.clone());
    let server_addr = config.bind_address();

    log::info!("Listening on https://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            // Application state (injected document store)
            .app_data(repo_data.clone())
            .app_data(handlers::json_config())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::photos_config)
            .configure(handlers::albums_config)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind_openssl(&server_addr, acceptor)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await?;

    // 7. Shutdown
    repo.close().await;
    log::info!("Server stopped");
    Ok(())
}
