use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::store::{Document, Patch};

/// A named skill with an optional proficiency label. Names are unique
/// across the collection, enforced by the table constraint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: Option<String>,
}

impl Document for Skill {
    const TABLE: &'static str = "skills";
    const ORDER_BY: &'static str = "name ASC";

    fn seed() -> Vec<Patch> {
        [
            ("JavaScript", "Advanced"),
            ("React", "Intermediate"),
            ("Node.js", "Intermediate"),
            ("HTML5", "Advanced"),
            ("CSS3", "Advanced"),
            ("MongoDB", "Intermediate"),
            ("Express.js", "Intermediate"),
            ("Git", "Advanced"),
            ("REST APIs", "Advanced"),
            ("Problem Solving", "Expert"),
            ("Communication", "Expert"),
        ]
        .into_iter()
        .map(|(name, level)| Patch::new().set("name", name).set("level", level))
        .collect()
    }
}
