//! Backend entry-point: loads settings, migrates, wires adapters and serves.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppDependencies, ServerSettings, build_http_state, create_server};
use todo_backend::inbound::http::health::HealthState;
use todo_backend::middleware::CorsPolicy;
use todo_backend::outbound::persistence::{DbPool, run_pending_migrations};

fn startup_error(stage: &'static str, error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{stage}: {error}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| startup_error("load settings", err))?;
    let database_url = settings
        .database_url()
        .map_err(|err| startup_error("load settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("load settings", err))?;

    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(|err| startup_error("migrate database", err))?;
    }

    let pool_config = settings
        .pool_config()
        .map_err(|err| startup_error("load settings", err))?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| startup_error("connect to database", err))?;

    let health_state = web::Data::new(HealthState::new());
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: build_http_state(&pool),
        cors: CorsPolicy::new(settings.cors_allowed_origins()),
    };
    let server = create_server(deps, bind_addr)?;

    health_state.mark_ready();
    info!(%bind_addr, "server listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
