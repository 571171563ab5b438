//! Enrollment storage. Admission runs inside the transaction so the verdict,
//! the membership row and the seat counter commit together.

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{classes, courses, enrollments, students};
use crate::errors::{LmsError, Result};
use crate::models::{
    classes::entities::Class,
    enrollments::{
        admission::{self, AdmissionDecision, AdmissionRefusal},
        entities::{Enrollment, EnrollmentStatus},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn enroll_student_impl(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<(Enrollment, Class)> {
        let txn = self.db.begin().await?;

        let student = students::Entity::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Student lookup failed: {e}")))?;
        if student.is_none() {
            return Err(LmsError::not_found(format!("Student {student_id} not found")));
        }

        let Some((class_row, course_row)) = classes::Entity::find_by_id(class_id)
            .find_also_related(courses::Entity)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class lookup failed: {e}")))?
        else {
            return Err(LmsError::not_found(format!("Class {class_id} not found")));
        };
        let course_row = course_row.ok_or_else(|| {
            LmsError::integrity(format!(
                "Class {} references missing course {}",
                class_row.id, class_row.course_id
            ))
        })?;

        let existing = enrollments::Entity::find_by_id((student_id.to_string(), class_id))
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Enrollment lookup failed: {e}")))?;

        let class = class_row.clone().into_class();
        let course = course_row.into_course();
        let existing_enrollment = existing.clone().map(|m| m.into_enrollment());

        let prerequisite_completed = match &course.prerequisite_id {
            Some(prereq) => {
                Self::has_completed_course_txn(&txn, student_id, prereq).await?
            }
            None => false,
        };

        let decision = admission::check_admission(
            &class,
            &course,
            existing_enrollment.as_ref(),
            prerequisite_completed,
        )
        .map_err(map_refusal)?;

        let now = chrono::Utc::now().timestamp();

        let enrollment = match decision {
            AdmissionDecision::Admit => {
                let model = enrollments::ActiveModel {
                    student_id: Set(student_id.to_string()),
                    class_id: Set(class_id),
                    status: Set(EnrollmentStatus::Active.as_str().to_string()),
                    enrolled_at: Set(now),
                    updated_at: Set(now),
                };
                model.insert(&txn).await?
            }
            AdmissionDecision::Reactivate => {
                let mut model: enrollments::ActiveModel = existing
                    .expect("reactivation implies an existing row")
                    .into();
                model.status = Set(EnrollmentStatus::Active.as_str().to_string());
                model.updated_at = Set(now);
                model.update(&txn).await?
            }
        };

        let class_model = classes::ActiveModel {
            id: Set(class_id),
            current_enrollment: Set(class_row.current_enrollment + 1),
            updated_at: Set(now),
            ..Default::default()
        };
        let updated_class = class_model.update(&txn).await?;

        txn.commit().await?;
        Ok((enrollment.into_enrollment(), updated_class.into_class()))
    }

    pub async fn unenroll_student_impl(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<(Enrollment, Class)> {
        let txn = self.db.begin().await?;

        let Some(class_row) = classes::Entity::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Class lookup failed: {e}")))?
        else {
            return Err(LmsError::not_found(format!("Class {class_id} not found")));
        };

        let Some(existing) = enrollments::Entity::find_by_id((student_id.to_string(), class_id))
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Enrollment lookup failed: {e}")))?
        else {
            return Err(LmsError::not_found(format!(
                "Student {student_id} is not enrolled in class {class_id}"
            )));
        };

        if existing.status != EnrollmentStatus::Active.as_str() {
            return Err(LmsError::conflict(format!(
                "Enrollment of {student_id} in class {class_id} is not active"
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let mut model: enrollments::ActiveModel = existing.into();
        model.status = Set(EnrollmentStatus::Dropped.as_str().to_string());
        model.updated_at = Set(now);
        let enrollment = model.update(&txn).await?;

        // Counter floors at zero even if it has drifted.
        let class_model = classes::ActiveModel {
            id: Set(class_id),
            current_enrollment: Set((class_row.current_enrollment - 1).max(0)),
            updated_at: Set(now),
            ..Default::default()
        };
        let updated_class = class_model.update(&txn).await?;

        txn.commit().await?;
        Ok((enrollment.into_enrollment(), updated_class.into_class()))
    }

    pub async fn get_enrollment_impl(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = enrollments::Entity::find_by_id((student_id.to_string(), class_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Enrollment lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn list_student_enrollments_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<(Enrollment, Class)>> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .find_also_related(classes::Entity)
            .order_by_asc(enrollments::Column::ClassId)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Enrollment list failed: {e}")))?;

        rows.into_iter()
            .map(|(enrollment, class)| {
                let class = class.ok_or_else(|| {
                    LmsError::integrity(format!(
                        "Enrollment of {} references missing class {}",
                        enrollment.student_id, enrollment.class_id
                    ))
                })?;
                Ok((enrollment.into_enrollment(), class.into_class()))
            })
            .collect()
    }

    pub async fn enrollment_status_map_impl(
        &self,
        class_id: i64,
    ) -> Result<HashMap<String, EnrollmentStatus>> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Enrollment list failed: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                EnrollmentStatus::parse(&m.status).map(|status| (m.student_id, status))
            })
            .collect())
    }

    /// COMPLETED enrollment in any class of `course_id`.
    async fn has_completed_course_txn(
        txn: &DatabaseTransaction,
        student_id: &str,
        course_id: &str,
    ) -> Result<bool> {
        let count = enrollments::Entity::find()
            .join(JoinType::InnerJoin, enrollments::Relation::Class.def())
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Completed.as_str()))
            .filter(classes::Column::CourseId.eq(course_id))
            .count(txn)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Prerequisite lookup failed: {e}"))
            })?;

        Ok(count > 0)
    }
}

// Full classes and missing prerequisites are request errors (400); only a
// duplicate enrollment is a state conflict (409).
fn map_refusal(refusal: AdmissionRefusal) -> LmsError {
    let message = refusal.message();
    match refusal {
        AdmissionRefusal::ClassNotActive
        | AdmissionRefusal::ClassFull
        | AdmissionRefusal::PrerequisiteNotMet { .. } => LmsError::validation(message),
        AdmissionRefusal::AlreadyEnrolled | AdmissionRefusal::AlreadyCompleted => {
            LmsError::conflict(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_refusal_status_codes() {
        assert_eq!(
            map_refusal(AdmissionRefusal::ClassFull).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            map_refusal(AdmissionRefusal::PrerequisiteNotMet {
                course_id: "TOEIC500".to_string(),
            })
            .http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            map_refusal(AdmissionRefusal::ClassNotActive).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            map_refusal(AdmissionRefusal::AlreadyEnrolled).http_status(),
            StatusCode::CONFLICT
        );
    }
}
