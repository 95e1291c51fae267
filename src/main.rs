//! SunCar Gateway
//!
//! Storefront API gateway for the SunCar solar backend: normalizes the offer
//! ("confección") catalog, reconciles recommendation results, and proxies
//! quote, chat, client and gallery requests behind a uniform JSON envelope.

use actix_web::{middleware, web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

mod api;
mod backend;
mod config;
mod domain;

use crate::backend::SuncarBackend;
use crate::config::Settings;

/// Application state shared across all handlers
pub struct AppState {
    pub backend: SuncarBackend,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("suncar_gateway=info".parse().unwrap())
                .add_directive("actix_web=info".parse().unwrap()),
        )
        .json()
        .init();

    // Load configuration
    let settings = Settings::load().expect("Failed to load configuration");
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    info!(
        "Starting SunCar Gateway v{} on {}",
        env!("CARGO_PKG_VERSION"),
        bind_addr
    );

    if settings.backend.url.is_empty() {
        tracing::warn!(
            "SUNCAR_BACKEND__URL is not set; backend-dependent endpoints will fail closed"
        );
    }

    let workers = settings
        .server
        .workers
        .unwrap_or_else(|| num_cpus::get() * 2);

    // Shared application state: one backend client for the process lifetime.
    // All request handling is stateless beyond this.
    let backend = SuncarBackend::new(&settings.backend);
    let app_state = web::Data::new(AppState { backend });

    // Configure and start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Service", "suncar-gateway"))
                    .add(("X-Version", env!("CARGO_PKG_VERSION"))),
            )
            .configure(api::configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
