use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::models::{
    assessments::{
        entities::{Attempt, Choice, Item, Part, Test},
        requests::{ItemSpec, NewAttempt, NewLesson, NewTest, LessonPatch, TestPatch},
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

use crate::errors::Result;

pub mod sea_orm_storage;

/// Outcome of a conflict-guarded schedule write. The overlap check and the
/// row write share one transaction, so a `Created` schedule was free of
/// conflicts at commit time.
#[derive(Debug)]
pub enum ScheduleCheckOutcome {
    Created(Schedule),
    /// The rows that overlap the candidate on the same date.
    Conflicts(Vec<Schedule>),
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Identity. Teachers, students and admins live in separate tables; a
    // principal lookup probes whichever table the id prefix names.
    async fn create_teacher(&self, req: CreateTeacherRequest, password_hash: String)
    -> Result<Teacher>;
    async fn create_student(&self, req: CreateStudentRequest, password_hash: String)
    -> Result<Student>;
    async fn get_teacher_by_id(&self, id: &str) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, query: UserQueryParams) -> Result<TeacherListResponse>;
    async fn list_students(&self, query: UserQueryParams) -> Result<StudentListResponse>;
    async fn find_principal_by_email(&self, email: &str) -> Result<Option<Principal>>;
    async fn find_principal_by_id(&self, id: &str) -> Result<Option<Principal>>;
    async fn email_in_use(&self, email: &str) -> Result<bool>;
    async fn count_admins(&self) -> Result<u64>;
    async fn create_admin(
        &self,
        full_name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<Principal>;

    // Courses and their 1:1 learning path.
    async fn create_course(&self, course: NewCourse) -> Result<Course>;
    async fn get_course(&self, course_id: &str) -> Result<Option<Course>>;
    async fn get_course_detail(&self, course_id: &str)
    -> Result<Option<(Course, Option<LearningPath>)>>;
    async fn list_courses(&self, query: CourseQueryParams) -> Result<CourseListResponse>;
    async fn update_course(&self, course_id: &str, patch: CoursePatch) -> Result<Option<Course>>;
    // Refuses while classes or dependent courses still reference it.
    async fn delete_course(&self, course_id: &str) -> Result<bool>;

    // Classes.
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    async fn get_class(&self, class_id: i64) -> Result<Option<Class>>;
    async fn get_class_with_course(&self, class_id: i64) -> Result<Option<(Class, Course)>>;
    async fn list_classes(&self, query: ClassQueryParams) -> Result<ClassListResponse>;
    async fn update_class(&self, class_id: i64, patch: ClassPatch) -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    // Enrollment. Admission runs inside the storage transaction so the
    // verdict, the membership row and the seat counter commit together.
    async fn enroll_student(&self, student_id: &str, class_id: i64)
    -> Result<(Enrollment, Class)>;
    async fn unenroll_student(&self, student_id: &str, class_id: i64)
    -> Result<(Enrollment, Class)>;
    async fn get_enrollment(&self, student_id: &str, class_id: i64)
    -> Result<Option<Enrollment>>;
    async fn list_student_enrollments(&self, student_id: &str)
    -> Result<Vec<(Enrollment, Class)>>;
    async fn enrollment_status_map(&self, class_id: i64)
    -> Result<HashMap<String, EnrollmentStatus>>;

    // Rooms.
    async fn create_room(&self, room: NewRoom) -> Result<Room>;
    async fn get_room(&self, room_id: i64) -> Result<Option<Room>>;
    async fn list_rooms(&self, query: RoomQueryParams) -> Result<RoomListResponse>;
    async fn update_room(&self, room_id: i64, patch: RoomPatch) -> Result<Option<Room>>;
    async fn delete_room(&self, room_id: i64) -> Result<bool>;
    async fn find_available_rooms(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        min_capacity: Option<i32>,
    ) -> Result<Vec<Room>>;

    // Schedules.
    async fn create_schedule_checked(&self, schedule: NewSchedule)
    -> Result<ScheduleCheckOutcome>;
    async fn update_schedule_checked(
        &self,
        schedule_id: i64,
        schedule: NewSchedule,
    ) -> Result<Option<ScheduleCheckOutcome>>;
    async fn get_schedule(&self, schedule_id: i64) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;
    async fn list_schedules_by_class(&self, class_id: i64) -> Result<Vec<Schedule>>;
    async fn list_schedules_for_teacher(
        &self,
        teacher_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Schedule>>;
    // Ownership in the scheduling sense: at least one session assigned.
    async fn teacher_owns_class(&self, teacher_id: &str, class_id: i64) -> Result<bool>;
    async fn list_classes_taught_by(&self, teacher_id: &str) -> Result<Vec<Class>>;

    // Parts catalog.
    async fn list_parts(&self) -> Result<Vec<Part>>;
    async fn get_part(&self, part_id: i64) -> Result<Option<Part>>;
    async fn seed_parts(&self, parts: &[(&str, i32)]) -> Result<()>;

    // Lesson authoring and delivery.
    async fn create_lesson_with_items(
        &self,
        lesson: NewLesson,
        items: Vec<ItemSpec>,
    ) -> Result<Lesson>;
    async fn update_lesson_with_items(
        &self,
        lesson_id: i64,
        patch: LessonPatch,
        items: Option<Vec<ItemSpec>>,
    ) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;
    async fn get_lesson(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    async fn list_lessons_for_paths(&self, lp_ids: &[String]) -> Result<Vec<Lesson>>;
    async fn lesson_question_counts(&self, lesson_ids: &[i64]) -> Result<HashMap<i64, i64>>;
    async fn items_with_choices_for_lesson(&self, lesson_id: i64)
    -> Result<Vec<(Item, Vec<Choice>)>>;
    async fn items_with_choices_for_part(
        &self,
        part_id: i64,
        limit: u64,
    ) -> Result<Vec<(Item, Vec<Choice>)>>;

    // Test authoring and delivery.
    async fn create_test_with_items(&self, test: NewTest, items: Vec<ItemSpec>) -> Result<Test>;
    async fn update_test_with_items(
        &self,
        test_id: i64,
        patch: TestPatch,
        items: Option<Vec<ItemSpec>>,
    ) -> Result<Option<Test>>;
    // Refuses once attempts exist.
    async fn delete_test(&self, test_id: i64) -> Result<bool>;
    async fn get_test(&self, test_id: i64) -> Result<Option<Test>>;
    async fn list_tests_by_classes(&self, class_ids: &[i64]) -> Result<Vec<Test>>;
    async fn items_with_choices_for_test(&self, test_id: i64)
    -> Result<Vec<(Item, Vec<Choice>)>>;
    async fn count_items_for_test(&self, test_id: i64) -> Result<i64>;

    // Attempts, append-only.
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<Attempt>;
    async fn count_attempts(&self, test_id: i64, student_id: &str) -> Result<i64>;
    async fn list_attempts_for_test(&self, test_id: i64) -> Result<Vec<Attempt>>;
    async fn student_names(&self, student_ids: &[String]) -> Result<HashMap<String, String>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
