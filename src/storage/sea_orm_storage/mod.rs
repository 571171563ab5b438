//! SeaORM storage implementation.
//!
//! One storage layer over SQLite, PostgreSQL and MySQL.

mod assessments;
mod classes;
mod courses;
mod enrollments;
mod lessons;
mod rooms;
mod schedules;
mod users;

use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite connection with WAL and pragma tuning.
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite connect failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL / MySQL connection.
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("Database connect failed: {e}")))
    }

    /// Infer the backend from the URL and normalize bare file paths.
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "Cannot infer database backend from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::{
    assessments::{
        entities::{Attempt, Choice, Item, Part, Test},
        requests::{ItemSpec, LessonPatch, NewAttempt, NewLesson, NewTest, TestPatch},
    },
    classes::{
        entities::Class,
        requests::{ClassPatch, ClassQueryParams, NewClass},
        responses::ClassListResponse,
    },
    courses::{
        entities::{Course, LearningPath},
        requests::{CoursePatch, CourseQueryParams, NewCourse},
        responses::CourseListResponse,
    },
    enrollments::entities::{Enrollment, EnrollmentStatus},
    lessons::entities::Lesson,
    rooms::{
        entities::Room,
        requests::{NewRoom, RoomPatch, RoomQueryParams},
        responses::RoomListResponse,
    },
    schedules::{entities::Schedule, requests::NewSchedule},
    users::{
        entities::{Principal, Student, Teacher},
        requests::{CreateStudentRequest, CreateTeacherRequest, UserQueryParams},
        responses::{StudentListResponse, TeacherListResponse},
    },
};
use crate::storage::{ScheduleCheckOutcome, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Identity
    async fn create_teacher(
        &self,
        req: CreateTeacherRequest,
        password_hash: String,
    ) -> Result<Teacher> {
        self.create_teacher_impl(req, password_hash).await
    }

    async fn create_student(
        &self,
        req: CreateStudentRequest,
        password_hash: String,
    ) -> Result<Student> {
        self.create_student_impl(req, password_hash).await
    }

    async fn get_teacher_by_id(&self, id: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers(&self, query: UserQueryParams) -> Result<TeacherListResponse> {
        self.list_teachers_impl(query).await
    }

    async fn list_students(&self, query: UserQueryParams) -> Result<StudentListResponse> {
        self.list_students_impl(query).await
    }

    async fn find_principal_by_email(&self, email: &str) -> Result<Option<Principal>> {
        self.find_principal_by_email_impl(email).await
    }

    async fn find_principal_by_id(&self, id: &str) -> Result<Option<Principal>> {
        self.find_principal_by_id_impl(id).await
    }

    async fn email_in_use(&self, email: &str) -> Result<bool> {
        self.email_in_use_impl(email).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    async fn create_admin(
        &self,
        full_name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<Principal> {
        self.create_admin_impl(full_name, email, password_hash).await
    }

    // Courses
    async fn create_course(&self, course: NewCourse) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        self.get_course_impl(course_id).await
    }

    async fn get_course_detail(
        &self,
        course_id: &str,
    ) -> Result<Option<(Course, Option<LearningPath>)>> {
        self.get_course_detail_impl(course_id).await
    }

    async fn list_courses(&self, query: CourseQueryParams) -> Result<CourseListResponse> {
        self.list_courses_impl(query).await
    }

    async fn update_course(&self, course_id: &str, patch: CoursePatch) -> Result<Option<Course>> {
        self.update_course_impl(course_id, patch).await
    }

    async fn delete_course(&self, course_id: &str) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // Classes
    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_impl(class_id).await
    }

    async fn get_class_with_course(&self, class_id: i64) -> Result<Option<(Class, Course)>> {
        self.get_class_with_course_impl(class_id).await
    }

    async fn list_classes(&self, query: ClassQueryParams) -> Result<ClassListResponse> {
        self.list_classes_impl(query).await
    }

    async fn update_class(&self, class_id: i64, patch: ClassPatch) -> Result<Option<Class>> {
        self.update_class_impl(class_id, patch).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // Enrollment
    async fn enroll_student(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<(Enrollment, Class)> {
        self.enroll_student_impl(student_id, class_id).await
    }

    async fn unenroll_student(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<(Enrollment, Class)> {
        self.unenroll_student_impl(student_id, class_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, class_id).await
    }

    async fn list_student_enrollments(
        &self,
        student_id: &str,
    ) -> Result<Vec<(Enrollment, Class)>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn enrollment_status_map(
        &self,
        class_id: i64,
    ) -> Result<HashMap<String, EnrollmentStatus>> {
        self.enrollment_status_map_impl(class_id).await
    }

    // Rooms
    async fn create_room(&self, room: NewRoom) -> Result<Room> {
        self.create_room_impl(room).await
    }

    async fn get_room(&self, room_id: i64) -> Result<Option<Room>> {
        self.get_room_impl(room_id).await
    }

    async fn list_rooms(&self, query: RoomQueryParams) -> Result<RoomListResponse> {
        self.list_rooms_impl(query).await
    }

    async fn update_room(&self, room_id: i64, patch: RoomPatch) -> Result<Option<Room>> {
        self.update_room_impl(room_id, patch).await
    }

    async fn delete_room(&self, room_id: i64) -> Result<bool> {
        self.delete_room_impl(room_id).await
    }

    async fn find_available_rooms(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        min_capacity: Option<i32>,
    ) -> Result<Vec<Room>> {
        self.find_available_rooms_impl(date, start_time, end_time, min_capacity)
            .await
    }

    // Schedules
    async fn create_schedule_checked(
        &self,
        schedule: NewSchedule,
    ) -> Result<ScheduleCheckOutcome> {
        self.create_schedule_checked_impl(schedule).await
    }

    async fn update_schedule_checked(
        &self,
        schedule_id: i64,
        schedule: NewSchedule,
    ) -> Result<Option<ScheduleCheckOutcome>> {
        self.update_schedule_checked_impl(schedule_id, schedule).await
    }

    async fn get_schedule(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        self.get_schedule_impl(schedule_id).await
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id).await
    }

    async fn list_schedules_by_class(&self, class_id: i64) -> Result<Vec<Schedule>> {
        self.list_schedules_by_class_impl(class_id).await
    }

    async fn list_schedules_for_teacher(
        &self,
        teacher_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Schedule>> {
        self.list_schedules_for_teacher_impl(teacher_id, from, to).await
    }

    async fn teacher_owns_class(&self, teacher_id: &str, class_id: i64) -> Result<bool> {
        self.teacher_owns_class_impl(teacher_id, class_id).await
    }

    async fn list_classes_taught_by(&self, teacher_id: &str) -> Result<Vec<Class>> {
        self.list_classes_taught_by_impl(teacher_id).await
    }

    // Parts
    async fn list_parts(&self) -> Result<Vec<Part>> {
        self.list_parts_impl().await
    }

    async fn get_part(&self, part_id: i64) -> Result<Option<Part>> {
        self.get_part_impl(part_id).await
    }

    async fn seed_parts(&self, parts: &[(&str, i32)]) -> Result<()> {
        self.seed_parts_impl(parts).await
    }

    // Lessons
    async fn create_lesson_with_items(
        &self,
        lesson: NewLesson,
        items: Vec<ItemSpec>,
    ) -> Result<Lesson> {
        self.create_lesson_with_items_impl(lesson, items).await
    }

    async fn update_lesson_with_items(
        &self,
        lesson_id: i64,
        patch: LessonPatch,
        items: Option<Vec<ItemSpec>>,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_with_items_impl(lesson_id, patch, items).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    async fn get_lesson(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_impl(lesson_id).await
    }

    async fn list_lessons_for_paths(&self, lp_ids: &[String]) -> Result<Vec<Lesson>> {
        self.list_lessons_for_paths_impl(lp_ids).await
    }

    async fn lesson_question_counts(&self, lesson_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        self.lesson_question_counts_impl(lesson_ids).await
    }

    async fn items_with_choices_for_lesson(
        &self,
        lesson_id: i64,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        self.items_with_choices_for_lesson_impl(lesson_id).await
    }

    async fn items_with_choices_for_part(
        &self,
        part_id: i64,
        limit: u64,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        self.items_with_choices_for_part_impl(part_id, limit).await
    }

    // Tests
    async fn create_test_with_items(&self, test: NewTest, items: Vec<ItemSpec>) -> Result<Test> {
        self.create_test_with_items_impl(test, items).await
    }

    async fn update_test_with_items(
        &self,
        test_id: i64,
        patch: TestPatch,
        items: Option<Vec<ItemSpec>>,
    ) -> Result<Option<Test>> {
        self.update_test_with_items_impl(test_id, patch, items).await
    }

    async fn delete_test(&self, test_id: i64) -> Result<bool> {
        self.delete_test_impl(test_id).await
    }

    async fn get_test(&self, test_id: i64) -> Result<Option<Test>> {
        self.get_test_impl(test_id).await
    }

    async fn list_tests_by_classes(&self, class_ids: &[i64]) -> Result<Vec<Test>> {
        self.list_tests_by_classes_impl(class_ids).await
    }

    async fn items_with_choices_for_test(
        &self,
        test_id: i64,
    ) -> Result<Vec<(Item, Vec<Choice>)>> {
        self.items_with_choices_for_test_impl(test_id).await
    }

    async fn count_items_for_test(&self, test_id: i64) -> Result<i64> {
        self.count_items_for_test_impl(test_id).await
    }

    // Attempts
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<Attempt> {
        self.insert_attempt_impl(attempt).await
    }

    async fn count_attempts(&self, test_id: i64, student_id: &str) -> Result<i64> {
        self.count_attempts_impl(test_id, student_id).await
    }

    async fn list_attempts_for_test(&self, test_id: i64) -> Result<Vec<Attempt>> {
        self.list_attempts_for_test_impl(test_id).await
    }

    async fn student_names(&self, student_ids: &[String]) -> Result<HashMap<String, String>> {
        self.student_names_impl(student_ids).await
    }
}
