use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task;

use crate::auth;
use crate::database::admins::AdminStore;
use crate::database::store::StoreError;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// POST /api/admin/login - verify credentials and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<Value>, ApiError> {
    let (user, pass) = match (payload.user, payload.pass) {
        (Some(user), Some(pass)) if !user.is_empty() => (user, pass),
        // incomplete credentials can never authenticate
        _ => return Err(ApiError::unauthorized("Invalid credentials")),
    };

    let hash = derive_hash(&state, pass, "Error logging in").await?;

    let store = AdminStore::new(state.pool.clone());
    let authenticated = store.credentials_match(&user, &hash).await.map_err(|err| {
        tracing::error!("credential lookup failed: {err}");
        ApiError::internal("Error logging in")
    })?;

    if !authenticated {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::issue_token(&user, &state.config.jwt_secret).map_err(|err| {
        tracing::error!("token generation failed: {err}");
        ApiError::internal("Error logging in")
    })?;

    tracing::info!("admin {user} logged in");
    Ok(Json(json!({ "success": true, "token": token })))
}

/// POST /api/admin/register - create the admin credential
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<Value>, ApiError> {
    let (user, pass) = match (payload.user, payload.pass) {
        (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => (user, pass),
        _ => return Err(ApiError::validation("Missing required fields (user, pass)")),
    };

    let hash = derive_hash(&state, pass, "Error registering admin").await?;

    let store = AdminStore::new(state.pool.clone());
    let existing = store.find(&user).await.map_err(|err| {
        tracing::error!("credential lookup failed: {err}");
        ApiError::internal("Error registering admin")
    })?;
    if existing.is_some() {
        return Err(ApiError::validation("Username already exists"));
    }

    match store.insert(&user, &hash).await {
        Ok(_) => {
            tracing::info!("admin {user} registered");
            Ok(Json(json!({
                "success": true,
                "message": "Admin registered successfully"
            })))
        }
        // lost a race with a concurrent registration for the same name
        Err(StoreError::Duplicate(_)) => Err(ApiError::validation("Username already exists")),
        Err(err) => {
            tracing::error!("credential insert failed: {err}");
            Err(ApiError::internal("Error registering admin"))
        }
    }
}

/// GET /api/admin/logout - sessions are stateless, the client discards the token
pub async fn logout() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}

/// Run the password derivation off the async runtime; it is deliberately
/// CPU-expensive.
async fn derive_hash(
    state: &AppState,
    password: String,
    client_message: &'static str,
) -> Result<String, ApiError> {
    let salt = state.config.password_salt.clone();
    task::spawn_blocking(move || auth::derive_password_hash(&password, &salt))
        .await
        .map_err(|err| {
            tracing::error!("password derivation task failed: {err}");
            ApiError::internal(client_message)
        })?
        .map_err(|err| {
            tracing::error!("password derivation failed: {err}");
            ApiError::internal(client_message)
        })
}
