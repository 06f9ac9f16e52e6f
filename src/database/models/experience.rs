use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::{Document, Patch};

/// A work-experience entry. Dates are free-form labels, not calendar types;
/// `end_date` may carry the sentinel "Present".
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub skills: Vec<String>,
}

impl Document for Experience {
    const TABLE: &'static str = "experiences";
    // insertion order
    const ORDER_BY: &'static str = "created_at";

    fn seed() -> Vec<Patch> {
        vec![
            Patch::new()
                .set("title", "Java Developer")
                .set("company", "Zork Tech Inc.")
                .set("location", "Mohali")
                .set("start_date", "June 2023")
                .set("end_date", "July 2024")
                .set(
                    "description",
                    "Developed and maintained client websites using modern web technologies.",
                )
                .set(
                    "skills",
                    vec![
                        "React".to_string(),
                        "Node.js".to_string(),
                        "MongoDB".to_string(),
                    ],
                ),
            Patch::new()
                .set("title", "Project Coordinator")
                .set("company", "Zork Tech Inc.")
                .set("location", "Mohali")
                .set("start_date", "June 2020")
                .set("end_date", "December 2021")
                .set(
                    "description",
                    "Assisted in developing web applications and gained experience in \
                     full-stack development.",
                )
                .set(
                    "skills",
                    vec![
                        "JavaScript".to_string(),
                        "HTML".to_string(),
                        "CSS".to_string(),
                        "PHP".to_string(),
                    ],
                ),
            Patch::new()
                .set("title", "Math Tutor")
                .set("company", "M.M. PG College")
                .set("location", "Sirsa")
                .set("start_date", "March 2019")
                .set("end_date", "July 2021")
                .set(
                    "description",
                    "Provided peer-to-peer academic support, helping college students \
                     work through complex mathematical concepts.",
                )
                .set(
                    "skills",
                    vec![
                        "Problem-Solving".to_string(),
                        "Critical Thinking".to_string(),
                        "Leadership".to_string(),
                        "Subject Mastery".to_string(),
                    ],
                ),
        ]
    }
}
