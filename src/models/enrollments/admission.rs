//! Admission decision for enrolling a student into a class.
//!
//! Pure check over already-loaded rows; the storage layer runs it inside the
//! enrollment transaction so the verdict and the row changes commit together.

use super::entities::{Enrollment, EnrollmentStatus};
use crate::models::classes::entities::{Class, ClassStatus};
use crate::models::courses::entities::Course;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// No prior membership, insert a fresh ACTIVE row.
    Admit,
    /// A DROPPED row exists, flip it back to ACTIVE.
    Reactivate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionRefusal {
    ClassNotActive,
    AlreadyEnrolled,
    AlreadyCompleted,
    ClassFull,
    PrerequisiteNotMet { course_id: String },
}

impl AdmissionRefusal {
    pub fn message(&self) -> String {
        match self {
            AdmissionRefusal::ClassNotActive => "Class is not open for enrollment".to_string(),
            AdmissionRefusal::AlreadyEnrolled => {
                "Student is already enrolled in this class".to_string()
            }
            AdmissionRefusal::AlreadyCompleted => {
                "Student has already completed this class".to_string()
            }
            AdmissionRefusal::ClassFull => "Class has reached its maximum enrollment".to_string(),
            AdmissionRefusal::PrerequisiteNotMet { course_id } => {
                format!("Prerequisite course {course_id} has not been completed")
            }
        }
    }
}

/// Decide whether a student may join `class`. `prerequisite_completed` is
/// the result of looking up a COMPLETED enrollment in any class of the
/// course's prerequisite; it is ignored when the course has none.
pub fn check_admission(
    class: &Class,
    course: &Course,
    existing: Option<&Enrollment>,
    prerequisite_completed: bool,
) -> Result<AdmissionDecision, AdmissionRefusal> {
    if class.status != ClassStatus::Active {
        return Err(AdmissionRefusal::ClassNotActive);
    }

    match existing.map(|e| e.status) {
        Some(EnrollmentStatus::Active) => return Err(AdmissionRefusal::AlreadyEnrolled),
        Some(EnrollmentStatus::Completed) => return Err(AdmissionRefusal::AlreadyCompleted),
        Some(EnrollmentStatus::Dropped) | None => {}
    }

    if class.is_full() {
        return Err(AdmissionRefusal::ClassFull);
    }

    if let Some(prereq) = &course.prerequisite_id
        && !prerequisite_completed
    {
        return Err(AdmissionRefusal::PrerequisiteNotMet {
            course_id: prereq.clone(),
        });
    }

    match existing {
        Some(_) => Ok(AdmissionDecision::Reactivate),
        None => Ok(AdmissionDecision::Admit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn class(status: ClassStatus, max: Option<i32>, current: i32) -> Class {
        Class {
            id: 1,
            course_id: "TOEIC500".into(),
            name: "TOEIC500-A".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
            max_students: max,
            current_enrollment: current,
            status,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn course(prerequisite: Option<&str>) -> Course {
        Course {
            course_id: "TOEIC500".into(),
            name: "TOEIC 500".into(),
            status: crate::models::courses::entities::CourseStatus::Open,
            prerequisite_id: prerequisite.map(|s| s.to_string()),
            target_score: Some(500),
            level: None,
            start_date: None,
            end_date: None,
            tuition: None,
            capacity: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn enrollment(status: EnrollmentStatus) -> Enrollment {
        Enrollment {
            student_id: "S00000001".into(),
            class_id: 1,
            status,
            enrolled_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admits_into_open_class() {
        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 5),
            &course(None),
            None,
            false,
        );
        assert_eq!(result, Ok(AdmissionDecision::Admit));
    }

    #[test]
    fn test_refuses_inactive_class() {
        let result = check_admission(
            &class(ClassStatus::Inactive, Some(20), 5),
            &course(None),
            None,
            false,
        );
        assert_eq!(result, Err(AdmissionRefusal::ClassNotActive));
    }

    #[test]
    fn test_refuses_full_class() {
        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 20),
            &course(None),
            None,
            false,
        );
        assert_eq!(result, Err(AdmissionRefusal::ClassFull));

        // No cap means never full.
        let result = check_admission(
            &class(ClassStatus::Active, None, 500),
            &course(None),
            None,
            false,
        );
        assert_eq!(result, Ok(AdmissionDecision::Admit));
    }

    #[test]
    fn test_refuses_duplicate_and_completed() {
        let active = enrollment(EnrollmentStatus::Active);
        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 5),
            &course(None),
            Some(&active),
            false,
        );
        assert_eq!(result, Err(AdmissionRefusal::AlreadyEnrolled));

        let completed = enrollment(EnrollmentStatus::Completed);
        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 5),
            &course(None),
            Some(&completed),
            false,
        );
        assert_eq!(result, Err(AdmissionRefusal::AlreadyCompleted));
    }

    #[test]
    fn test_reactivates_dropped_enrollment() {
        let dropped = enrollment(EnrollmentStatus::Dropped);
        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 5),
            &course(None),
            Some(&dropped),
            false,
        );
        assert_eq!(result, Ok(AdmissionDecision::Reactivate));
    }

    #[test]
    fn test_prerequisite_gate() {
        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 5),
            &course(Some("TOEIC300")),
            None,
            false,
        );
        assert_eq!(
            result,
            Err(AdmissionRefusal::PrerequisiteNotMet {
                course_id: "TOEIC300".into()
            })
        );

        let result = check_admission(
            &class(ClassStatus::Active, Some(20), 5),
            &course(Some("TOEIC300")),
            None,
            true,
        );
        assert_eq!(result, Ok(AdmissionDecision::Admit));
    }
}
