pub mod auth;
pub mod classes;
pub mod courses;
pub mod rooms;
pub mod schedules;
pub mod student_lessons;
pub mod student_tests;
pub mod teacher_lessons;
pub mod teacher_tests;
pub mod users;

mod authoring;

pub use auth::AuthService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use rooms::RoomService;
pub use schedules::ScheduleService;
pub use student_lessons::StudentLessonService;
pub use student_tests::StudentTestService;
pub use teacher_lessons::TeacherLessonService;
pub use teacher_tests::TeacherTestService;
pub use users::UserService;
