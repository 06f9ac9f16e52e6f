use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Skill;
use crate::database::store::{Collection, Patch, StoreError};
use crate::error::ApiError;
use crate::handlers::payload::parse_id;
use crate::middleware::auth::AdminIdentity;
use crate::AppState;

const INVALID_ID: &str = "Invalid Skill ID format";

#[derive(Debug, Deserialize)]
pub struct SkillPayload {
    pub name: Option<String>,
    pub level: Option<String>,
}

/// GET /api/skills/list - public, seeds the sample set when empty
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let skills = Collection::<Skill>::new(state.pool.clone())
        .list_seeding_on_empty()
        .await
        .map_err(|err| {
            tracing::error!("failed to list skills: {err}");
            ApiError::internal("Error fetching skills")
        })?;

    Ok(Json(json!({
        "success": true,
        "count": skills.len(),
        "skills": skills,
    })))
}

/// POST /api/skills/add - admin
pub async fn add(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Json(payload): Json<SkillPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::validation("Missing required field: name"))?
        .to_string();

    let mut patch = Patch::new().set("name", name.clone());
    if let Some(level) = payload.level {
        patch = patch.set("level", level.trim());
    }

    match Collection::<Skill>::new(state.pool.clone()).insert(&patch).await {
        Ok(skill) => {
            tracing::info!("skill {} added by {}", skill.name, admin.username);
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Skill added successfully",
                    "skill": skill,
                })),
            ))
        }
        Err(StoreError::Duplicate(_)) => Err(ApiError::conflict(format!(
            "Skill with name \"{name}\" already exists."
        ))),
        Err(err) => {
            tracing::error!("failed to add skill: {err}");
            Err(ApiError::internal("Error adding skill"))
        }
    }
}

/// PUT /api/skills/:id - admin, partial update of only the supplied fields
pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    Json(payload): Json<SkillPayload>,
) -> Result<Json<Value>, ApiError> {
    let skill_id = parse_id(&id, INVALID_ID)?;

    let mut patch = Patch::new();
    let mut new_name = None;
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("Skill name cannot be empty"));
        }
        patch = patch.set("name", name.clone());
        new_name = Some(name);
    }
    if let Some(level) = payload.level {
        patch = patch.set("level", level.trim());
    }

    // an empty patch reads back the current document, no error forced
    match Collection::<Skill>::new(state.pool.clone())
        .update(skill_id, &patch)
        .await
    {
        Ok(Some(skill)) => {
            tracing::info!("skill {} updated by {}", skill.id, admin.username);
            Ok(Json(json!({
                "success": true,
                "message": "Skill updated successfully",
                "skill": skill,
            })))
        }
        Ok(None) => Err(ApiError::not_found(format!("Skill with ID {id} not found"))),
        Err(StoreError::Duplicate(_)) => Err(ApiError::conflict(format!(
            "Another skill with the name \"{}\" already exists.",
            new_name.unwrap_or_default()
        ))),
        Err(err) => {
            tracing::error!("failed to update skill: {err}");
            Err(ApiError::internal("Error updating skill"))
        }
    }
}

/// DELETE /api/skills/:id - admin; missing documents are reported
pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let skill_id = parse_id(&id, INVALID_ID)?;

    match Collection::<Skill>::new(state.pool.clone()).delete(skill_id).await {
        Ok(true) => {
            tracing::info!("skill {id} deleted by {}", admin.username);
            Ok(Json(json!({
                "success": true,
                "message": format!("Skill with ID {id} deleted successfully"),
            })))
        }
        Ok(false) => Err(ApiError::not_found(format!("Skill with ID {id} not found"))),
        Err(err) => {
            tracing::error!("failed to delete skill: {err}");
            Err(ApiError::internal("Error deleting skill"))
        }
    }
}
