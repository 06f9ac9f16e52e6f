pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Shared per-request context: the connection pool and the loaded
/// configuration. No process-wide mutable state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(handlers::info::root))
        .route("/api", get(handlers::info::api_ready))
        .route("/health", get(handlers::info::health))
        .route("/api/portfolio-info", get(handlers::info::portfolio_info))
        .merge(admin_routes())
        .merge(skill_routes(state.clone()))
        .merge(project_routes(state.clone()))
        .merge(experience_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/register", post(admin::register))
        .route("/api/admin/logout", get(admin::logout))
}

// For each resource the mutating routes sit behind the admin guard; listing
// stays public.

fn skill_routes(state: AppState) -> Router<AppState> {
    use handlers::skills;

    Router::new()
        .route("/api/skills/add", post(skills::add))
        .route("/api/skills/:id", put(skills::update).delete(skills::remove))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin))
        .route("/api/skills/list", get(skills::list))
}

fn project_routes(state: AppState) -> Router<AppState> {
    use handlers::projects;

    Router::new()
        .route("/api/projects/add", post(projects::add))
        .route("/api/projects/update", put(projects::update))
        .route("/api/projects/delete", delete(projects::remove))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin))
        .route("/api/projects/list", get(projects::list))
}

fn experience_routes(state: AppState) -> Router<AppState> {
    use handlers::experience;

    Router::new()
        .route("/api/experience/add", post(experience::add))
        .route("/api/experience/update", put(experience::update))
        .route("/api/experience/delete", delete(experience::remove))
        .route_layer(from_fn_with_state(state, middleware::auth::require_admin))
        .route("/api/experience/list", get(experience::list))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
