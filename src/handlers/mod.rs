pub mod admin;
pub mod experience;
pub mod info;
pub mod payload;
pub mod projects;
pub mod skills;
