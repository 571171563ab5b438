use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::error;

use super::StudentLessonService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::models::lessons::responses::{
    ClassContext, StudentLessonListResponse, StudentLessonSummary,
};
use crate::utils::datetime::today;

/// Every lesson across the learning paths of the student's active classes,
/// with the 1-based week index and the unlock flag per lesson.
pub async fn list_lessons(
    service: &StudentLessonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                "AUTHENTICATION",
                "Authentication required",
            )));
        }
    };

    let enrollments = match storage.list_student_enrollments(&student_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    let mut classes = Vec::new();
    // Course id -> class context; first active class per course wins.
    let mut class_for_course: HashMap<String, ClassContext> = HashMap::new();
    for (enrollment, class) in &enrollments {
        if enrollment.status != EnrollmentStatus::Active {
            continue;
        }
        let (class, course) = match storage.get_class_with_course(class.id).await {
            Ok(Some(pair)) => pair,
            Ok(None) => continue,
            Err(e) => return Ok(crate::models::respond_err(&e)),
        };
        let context = ClassContext {
            class_id: class.id,
            class_name: class.name.clone(),
            course_id: course.course_id.clone(),
            course_name: course.name.clone(),
        };
        class_for_course
            .entry(course.course_id.clone())
            .or_insert_with(|| context.clone());
        classes.push(context);
    }

    let lp_ids: Vec<String> = class_for_course.keys().cloned().collect();
    let lessons = match storage.list_lessons_for_paths(&lp_ids).await {
        Ok(lessons) => lessons,
        Err(e) => {
            error!("Lesson list for {} failed: {}", student_id, e);
            return Ok(crate::models::respond_err(&e));
        }
    };

    let lesson_ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();
    let counts = match storage.lesson_question_counts(&lesson_ids).await {
        Ok(counts) => counts,
        Err(e) => return Ok(crate::models::respond_err(&e)),
    };

    // Rows arrive ordered by (lp_id, id); creation order defines the week.
    let reference_date = today();
    let mut week_counters: HashMap<String, i32> = HashMap::new();
    let mut summaries = Vec::with_capacity(lessons.len());
    for lesson in lessons {
        let week = week_counters.entry(lesson.lp_id.clone()).or_insert(0);
        *week += 1;
        let Some(context) = class_for_course.get(&lesson.lp_id) else {
            continue;
        };
        summaries.push(StudentLessonSummary {
            class_id: context.class_id,
            class_name: context.class_name.clone(),
            week_index: *week,
            is_unlocked: lesson.is_unlocked_on(reference_date),
            question_count: counts.get(&lesson.id).copied().unwrap_or(0),
            lesson,
        });
    }

    let response = StudentLessonListResponse {
        lessons: summaries,
        classes,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Lessons retrieved")))
}
