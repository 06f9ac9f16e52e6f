pub mod experience;
pub mod project;
pub mod skill;

pub use experience::Experience;
pub use project::Project;
pub use skill::Skill;
