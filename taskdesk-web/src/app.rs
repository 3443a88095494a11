/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskdesk_shared::db::pool::create_pool;
/// use taskdesk_web::{app::AppState, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.pool_config()).await?;
/// let state = AppState::new(pool, config);
/// let app = taskdesk_web::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::{PageError, PageResult},
    middleware::security::SecurityHeadersLayer,
    session::current_session,
};
use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::{Redirect, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the router with every page and the middleware stack
///
/// ```text
/// /
/// ├── GET  /                      → 303 /dashboard
/// ├── GET  /health                # JSON health check
/// ├── GET  /assets/app.js|app.css # Embedded assets
/// ├── GET|POST /auth/login
/// ├── GET|POST /auth/register
/// ├── GET  /logout
/// └── (login required)
///     ├── GET      /dashboard
///     ├── GET|POST /add_task
///     └── GET|POST /profile
/// ```
///
/// Unknown paths get the 404 page. Every response carries the security
/// headers and is compressed when the client accepts gzip or brotli.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(routes::health::health_check))
        .route("/assets/app.js", get(routes::assets::app_js))
        .route("/assets/app.css", get(routes::assets::app_css))
        .route(
            "/auth/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route(
            "/auth/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route("/logout", get(routes::auth::logout));

    let protected_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route(
            "/add_task",
            get(routes::tasks::add_task_form).post(routes::tasks::add_task),
        )
        .route(
            "/profile",
            get(routes::profile::profile).post(routes::profile::update_profile),
        )
        .layer(from_fn_with_state(state.clone(), session_guard));

    let production = state.config.app.production;

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

/// Login requirement for protected pages
///
/// Resolves the cookie to a live session and hands it to the handler as an
/// `Extension<Session>`. Without one the browser is sent to the login page.
async fn session_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> PageResult<Response> {
    let session = current_session(&state, req.headers())
        .await?
        .ok_or(PageError::Unauthenticated)?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

async fn not_found() -> PageError {
    PageError::NotFound
}
