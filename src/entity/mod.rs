//! SeaORM entity definitions.
//!
//! These entities are the database models; the storage layer converts them
//! into the business models under `crate::models`.

pub mod prelude;

pub mod admins;
pub mod attempts;
pub mod choices;
pub mod classes;
pub mod courses;
pub mod enrollments;
pub mod items;
pub mod learning_paths;
pub mod lessons;
pub mod parts;
pub mod rooms;
pub mod schedules;
pub mod students;
pub mod teachers;
pub mod tests;
