use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Experience;
use crate::database::store::{Collection, Patch};
use crate::error::ApiError;
use crate::handlers::payload::{parse_id, StringList};
use crate::middleware::auth::AdminIdentity;
use crate::AppState;

const INVALID_ID: &str = "Invalid Experience ID format";
const MISSING_ID: &str = "Experience ID (expId) is required in query string";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub skills: Option<StringList>,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceIdQuery {
    #[serde(rename = "expId")]
    pub exp_id: Option<String>,
}

/// GET /api/experience/list - public, seeds the sample set when empty
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let experiences = Collection::<Experience>::new(state.pool.clone())
        .list_seeding_on_empty()
        .await
        .map_err(|err| {
            tracing::error!("failed to list experiences: {err}");
            ApiError::internal("Error fetching experiences")
        })?;

    Ok(Json(json!({
        "success": true,
        "count": experiences.len(),
        "data": experiences,
    })))
}

/// POST /api/experience/add - admin; every descriptive field is required
pub async fn add(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Json(payload): Json<ExperiencePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let required = [
        ("title", &payload.title),
        ("company", &payload.company),
        ("location", &payload.location),
        ("startDate", &payload.start_date),
        ("endDate", &payload.end_date),
        ("description", &payload.description),
    ];
    if required
        .iter()
        .any(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
    {
        return Err(ApiError::validation(
            "Missing required fields (title, company, location, startDate, endDate, description)",
        ));
    }

    let patch = Patch::new()
        .set("title", payload.title.unwrap_or_default())
        .set("company", payload.company.unwrap_or_default())
        .set("location", payload.location.unwrap_or_default())
        .set("start_date", payload.start_date.unwrap_or_default())
        .set("end_date", payload.end_date.unwrap_or_default())
        .set("description", payload.description.unwrap_or_default())
        .set(
            "skills",
            payload.skills.map(StringList::into_vec).unwrap_or_default(),
        );

    match Collection::<Experience>::new(state.pool.clone()).insert(&patch).await {
        Ok(experience) => {
            tracing::info!("experience {} added by {}", experience.id, admin.username);
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Experience added",
                    "data": experience,
                })),
            ))
        }
        Err(err) => {
            tracing::error!("failed to add experience: {err}");
            Err(ApiError::internal("Error adding experience"))
        }
    }
}

/// PUT /api/experience/update?expId= - admin, partial update
pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Query(query): Query<ExperienceIdQuery>,
    Json(payload): Json<ExperiencePayload>,
) -> Result<Json<Value>, ApiError> {
    let raw_id = query.exp_id.ok_or_else(|| ApiError::validation(MISSING_ID))?;
    let experience_id = parse_id(&raw_id, INVALID_ID)?;

    let mut patch = Patch::new();
    if let Some(title) = payload.title {
        patch = patch.set("title", title);
    }
    if let Some(company) = payload.company {
        patch = patch.set("company", company);
    }
    if let Some(location) = payload.location {
        patch = patch.set("location", location);
    }
    if let Some(start_date) = payload.start_date {
        patch = patch.set("start_date", start_date);
    }
    if let Some(end_date) = payload.end_date {
        patch = patch.set("end_date", end_date);
    }
    if let Some(description) = payload.description {
        patch = patch.set("description", description);
    }
    if let Some(skills) = payload.skills {
        patch = patch.set("skills", skills.into_vec());
    }

    match Collection::<Experience>::new(state.pool.clone())
        .update(experience_id, &patch)
        .await
    {
        Ok(Some(experience)) => {
            tracing::info!("experience {} updated by {}", experience.id, admin.username);
            Ok(Json(json!({
                "success": true,
                "message": "Experience updated successfully",
                "data": experience,
            })))
        }
        Ok(None) => Err(ApiError::not_found("Experience not found")),
        Err(err) => {
            tracing::error!("failed to update experience: {err}");
            Err(ApiError::internal("Error updating experience"))
        }
    }
}

/// DELETE /api/experience/delete?expId= - admin. A missing document is
/// logged but still reported as success.
pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Query(query): Query<ExperienceIdQuery>,
) -> Result<Json<Value>, ApiError> {
    let raw_id = query.exp_id.ok_or_else(|| ApiError::validation(MISSING_ID))?;
    let experience_id = parse_id(&raw_id, INVALID_ID)?;

    match Collection::<Experience>::new(state.pool.clone())
        .delete(experience_id)
        .await
    {
        Ok(deleted) => {
            if deleted {
                tracing::info!("experience {raw_id} deleted by {}", admin.username);
            } else {
                tracing::warn!("experience {raw_id} not found for deletion");
            }
            Ok(Json(json!({ "success": true, "message": "Experience deleted" })))
        }
        Err(err) => {
            tracing::error!("failed to delete experience: {err}");
            Err(ApiError::internal("Error deleting experience"))
        }
    }
}
