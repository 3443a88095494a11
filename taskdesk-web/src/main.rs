//! # TaskDesk Web Server
//!
//! Serves the TaskDesk pages: registration, login, the task dashboard,
//! the add-task form and the profile page.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskdesk cargo run -p taskdesk-web
//! ```

use taskdesk_shared::db::{migrations, pool};
use taskdesk_web::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("TaskDesk v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    if config.run_migrations {
        migrations::ensure_database_exists(&config.database.url).await?;
    }

    let db = pool::create_pool(config.database.pool_config()).await?;
    if config.run_migrations {
        migrations::run_migrations(&db).await?;
    }

    let address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// `RUST_LOG` filter plus a text or JSON (`LOG_FORMAT=json`) fmt layer
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskdesk_web=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
