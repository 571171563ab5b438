pub use super::admins::Entity as Admins;
pub use super::attempts::Entity as Attempts;
pub use super::choices::Entity as Choices;
pub use super::classes::Entity as Classes;
pub use super::courses::Entity as Courses;
pub use super::enrollments::Entity as Enrollments;
pub use super::items::Entity as Items;
pub use super::learning_paths::Entity as LearningPaths;
pub use super::lessons::Entity as Lessons;
pub use super::parts::Entity as Parts;
pub use super::rooms::Entity as Rooms;
pub use super::schedules::Entity as Schedules;
pub use super::students::Entity as Students;
pub use super::teachers::Entity as Teachers;
pub use super::tests::Entity as Tests;
