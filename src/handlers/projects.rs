use axum::{
    extract::{Extension, FromRequest, Multipart, Query, Request, State},
    http::{header, StatusCode},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Project;
use crate::database::store::{Collection, Patch};
use crate::error::ApiError;
use crate::handlers::payload::{parse_id, ImageUpload, StringList};
use crate::middleware::auth::AdminIdentity;
use crate::AppState;

const INVALID_ID: &str = "Invalid Project ID format";
const MISSING_ID: &str = "Project ID (projId) is required in query string";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub tech_stack: Option<StringList>,
    #[serde(skip)]
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectIdQuery {
    #[serde(rename = "projId")]
    pub proj_id: Option<String>,
}

/// GET /api/projects/list - public, seeds the sample set when empty
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = Collection::<Project>::new(state.pool.clone())
        .list_seeding_on_empty()
        .await
        .map_err(|err| {
            tracing::error!("failed to list projects: {err}");
            ApiError::internal("Error fetching projects")
        })?;

    Ok(Json(json!({
        "success": true,
        "count": projects.len(),
        "projects": projects,
    })))
}

/// POST /api/projects/add - admin; multipart form with an optional `image`
/// file part, or a plain JSON body when there is nothing to upload
pub async fn add(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    request: Request,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = read_payload(request).await?;

    let (name, description) = match (&payload.name, &payload.description) {
        (Some(name), Some(description)) if !name.is_empty() && !description.is_empty() => {
            (name.clone(), description.clone())
        }
        _ => {
            return Err(ApiError::validation(
                "Missing required fields (name, description)",
            ))
        }
    };

    let mut patch = Patch::new()
        .set("name", name)
        .set("description", description)
        .set(
            "tech_stack",
            payload.tech_stack.map(StringList::into_vec).unwrap_or_default(),
        );
    if let Some(url) = payload.project_url {
        patch = patch.set("project_url", url);
    }
    if let Some(url) = payload.github_url {
        patch = patch.set("github_url", url);
    }
    patch = apply_image(patch, payload.image);

    match Collection::<Project>::new(state.pool.clone()).insert(&patch).await {
        Ok(project) => {
            tracing::info!("project {} added by {}", project.name, admin.username);
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Project added successfully",
                    "project": project,
                })),
            ))
        }
        Err(err) => {
            tracing::error!("failed to add project: {err}");
            Err(ApiError::internal("Error adding project"))
        }
    }
}

/// PUT /api/projects/update?projId= - admin, partial update; a stored image
/// is only overwritten when the request carries a new one
pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Query(query): Query<ProjectIdQuery>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let raw_id = query.proj_id.ok_or_else(|| ApiError::validation(MISSING_ID))?;
    let project_id = parse_id(&raw_id, INVALID_ID)?;

    let payload = read_payload(request).await?;

    let mut patch = Patch::new();
    if let Some(name) = payload.name {
        patch = patch.set("name", name);
    }
    if let Some(description) = payload.description {
        patch = patch.set("description", description);
    }
    if let Some(url) = payload.project_url {
        patch = patch.set("project_url", url);
    }
    if let Some(url) = payload.github_url {
        patch = patch.set("github_url", url);
    }
    if let Some(stack) = payload.tech_stack {
        patch = patch.set("tech_stack", stack.into_vec());
    }
    patch = apply_image(patch, payload.image);

    match Collection::<Project>::new(state.pool.clone())
        .update(project_id, &patch)
        .await
    {
        Ok(Some(project)) => {
            tracing::info!("project {} updated by {}", project.id, admin.username);
            Ok(Json(json!({
                "success": true,
                "message": "Project updated successfully",
                "project": project,
            })))
        }
        Ok(None) => Err(ApiError::not_found(format!(
            "Project with ID {raw_id} not found"
        ))),
        Err(err) => {
            tracing::error!("failed to update project: {err}");
            Err(ApiError::internal("Error updating project"))
        }
    }
}

/// DELETE /api/projects/delete?projId= - admin. A missing document is logged
/// but still reported as success.
pub async fn remove(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Query(query): Query<ProjectIdQuery>,
) -> Result<Json<Value>, ApiError> {
    let raw_id = query.proj_id.ok_or_else(|| ApiError::validation(MISSING_ID))?;
    let project_id = parse_id(&raw_id, INVALID_ID)?;

    match Collection::<Project>::new(state.pool.clone()).delete(project_id).await {
        Ok(deleted) => {
            if deleted {
                tracing::info!("project {raw_id} deleted by {}", admin.username);
            } else {
                tracing::warn!("project {raw_id} not found for deletion");
            }
            Ok(Json(json!({
                "success": true,
                "message": format!("Project with ID {raw_id} deleted successfully"),
            })))
        }
        Err(err) => {
            tracing::error!("failed to delete project: {err}");
            Err(ApiError::internal("Error deleting project"))
        }
    }
}

fn apply_image(patch: Patch, image: Option<ImageUpload>) -> Patch {
    match image {
        Some(image) => {
            let patch = patch.set("image", image.bytes);
            patch.set("image_type", image.content_type)
        }
        None => patch,
    }
}

/// Accept either `multipart/form-data` (the image-upload path) or JSON.
async fn read_payload(request: Request) -> Result<ProjectPayload, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|err| ApiError::validation(format!("Invalid multipart body: {err}")))?;
        read_multipart(multipart).await
    } else {
        let Json(payload) = Json::<ProjectPayload>::from_request(request, &())
            .await
            .map_err(|err| ApiError::validation(format!("Invalid request body: {err}")))?;
        Ok(payload)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ProjectPayload, ApiError> {
    let mut payload = ProjectPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::validation(format!("Invalid multipart body: {err}")))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("name") => payload.name = Some(text(field).await?),
            Some("description") => payload.description = Some(text(field).await?),
            Some("projectUrl") => payload.project_url = Some(text(field).await?),
            Some("githubUrl") => payload.github_url = Some(text(field).await?),
            Some("techStack") => {
                payload.tech_stack =
                    Some(StringList::from_comma_separated(&text(field).await?));
            }
            Some("image") => {
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(|err| {
                    ApiError::validation(format!("Invalid image upload: {err}"))
                })?;
                // an empty file input still submits a zero-byte part
                if !bytes.is_empty() {
                    payload.image = Some(ImageUpload {
                        bytes: bytes.to_vec(),
                        content_type,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(payload)
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|err| ApiError::validation(format!("Invalid multipart field: {err}")))
}
