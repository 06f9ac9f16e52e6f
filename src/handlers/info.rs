use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::database;
use crate::AppState;

/// GET / - plain readiness banner
pub async fn root() -> &'static str {
    "Portfolio Backend API is running!"
}

/// GET /api
pub async fn api_ready() -> Json<Value> {
    Json(json!({ "message": "Portfolio API is ready!" }))
}

/// GET /health - liveness plus a store round-trip
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match database::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "status": "ok",
                "database": "ok",
            })),
        ),
        Err(err) => {
            tracing::error!("health check failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "status": "degraded",
                    "database": "unavailable",
                })),
            )
        }
    }
}

/// GET /api/portfolio-info - static aggregate payload for the frontend header
pub async fn portfolio_info() -> Json<Value> {
    Json(json!({
        "name": "Suman Rani",
        "role": "Java Developer",
        "summary": "Passionate developer building modern, responsive web applications.",
        "location": "Canada",
        "email": "sumankamboj1997@gmail.com",
        "github": "https://github.com/codesumanr",
        "linkedin": "https://www.linkedin.com/in/suman-r-b60155260"
    }))
}
