pub mod auth;
pub mod classes;
pub mod courses;
pub mod rooms;
pub mod schedules;
pub mod student;
pub mod system;
pub mod teacher;
pub mod users;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use courses::configure_courses_routes;
pub use rooms::configure_rooms_routes;
pub use schedules::configure_schedules_routes;
pub use student::configure_student_routes;
pub use system::configure_system_routes;
pub use teacher::configure_teacher_routes;
pub use users::configure_user_routes;
