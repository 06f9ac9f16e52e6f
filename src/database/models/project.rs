use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::{Document, Patch};

/// A showcased project. The image is stored inline as raw bytes next to its
/// declared MIME type and serialized to base64 on the way out.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "image_as_base64")]
    pub image: Option<Vec<u8>>,
    pub image_type: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub tech_stack: Vec<String>,
}

fn image_as_base64<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match bytes {
        Some(bytes) => serializer.serialize_some(&BASE64.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

impl Document for Project {
    const TABLE: &'static str = "projects";
    // insertion order
    const ORDER_BY: &'static str = "created_at";

    fn seed() -> Vec<Patch> {
        vec![
            Patch::new()
                .set("name", "DanceLover")
                .set(
                    "description",
                    "Web application for discovering nearby dance studios on a map and \
                     watching curated dance videos.",
                )
                .set("project_url", "https://example.com/dancelover")
                .set("github_url", "https://github.com/codesumanr/DanceLover")
                .set(
                    "tech_stack",
                    vec![
                        "Node.js".to_string(),
                        "Express.js".to_string(),
                        "MongoDB".to_string(),
                        "Pug".to_string(),
                    ],
                ),
            Patch::new()
                .set("name", "Library Management System")
                .set(
                    "description",
                    "Catalogue and lending platform for a small library, with member \
                     accounts and overdue tracking.",
                )
                .set("project_url", "https://example.com/librarysystem")
                .set("github_url", "https://github.com/codesumanr/librarysystem")
                .set(
                    "tech_stack",
                    vec!["HTML".to_string(), "CSS".to_string(), "jQuery".to_string()],
                ),
        ]
    }
}
