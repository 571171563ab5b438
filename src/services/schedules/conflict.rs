//! Conflict classification over already-detected colliding sessions.
//!
//! Two sessions collide when they fall on the same date, share the room or
//! the teacher, and their `[start, end)` intervals overlap. Touching
//! intervals (one ends exactly when the other starts) do not collide. The
//! storage layer finds colliding rows in SQL with the same predicate; this
//! module only decides which side collides for the error payload.

use chrono::NaiveTime;

use crate::models::schedules::entities::Schedule;
use crate::models::schedules::requests::NewSchedule;
use crate::models::schedules::responses::{ConflictSide, ScheduleConflictInfo};

/// Half-open interval overlap.
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn classify(candidate: &NewSchedule, existing: &Schedule) -> ConflictSide {
    let same_room = candidate.room_id == existing.room_id;
    let same_teacher = candidate.teacher_id == existing.teacher_id;
    match (same_room, same_teacher) {
        (true, true) => ConflictSide::Both,
        (true, false) => ConflictSide::Room,
        _ => ConflictSide::Teacher,
    }
}

pub fn describe(candidate: &NewSchedule, conflicts: &[Schedule]) -> Vec<ScheduleConflictInfo> {
    conflicts
        .iter()
        .map(|existing| ScheduleConflictInfo {
            side: classify(candidate, existing),
            schedule_id: existing.id,
            room_id: existing.room_id,
            teacher_id: existing.teacher_id.clone(),
            schedule_date: existing.schedule_date,
            start_time: existing.start_time,
            end_time: existing.end_time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn candidate(room_id: i64, teacher_id: &str) -> NewSchedule {
        NewSchedule {
            room_id,
            class_id: 1,
            teacher_id: teacher_id.to_string(),
            schedule_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            start_time: t(9, 0),
            end_time: t(11, 0),
        }
    }

    fn existing(room_id: i64, teacher_id: &str) -> Schedule {
        Schedule {
            id: 7,
            room_id,
            class_id: 2,
            teacher_id: teacher_id.to_string(),
            schedule_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            start_time: t(10, 0),
            end_time: t(12, 0),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        assert!(intervals_overlap(t(9, 0), t(11, 0), t(10, 0), t(12, 0)));
        assert!(intervals_overlap(t(9, 0), t(11, 0), t(9, 30), t(10, 0)));
        // Touching boundaries do not overlap.
        assert!(!intervals_overlap(t(9, 0), t(11, 0), t(11, 0), t(13, 0)));
        assert!(!intervals_overlap(t(11, 0), t(13, 0), t(9, 0), t(11, 0)));
        assert!(!intervals_overlap(t(9, 0), t(10, 0), t(10, 30), t(11, 0)));
    }

    #[test]
    fn test_side_classification() {
        assert_eq!(
            classify(&candidate(1, "T00000001"), &existing(1, "T00000002")),
            ConflictSide::Room
        );
        assert_eq!(
            classify(&candidate(1, "T00000001"), &existing(2, "T00000001")),
            ConflictSide::Teacher
        );
        assert_eq!(
            classify(&candidate(1, "T00000001"), &existing(1, "T00000001")),
            ConflictSide::Both
        );
    }

    #[test]
    fn test_describe_carries_existing_row() {
        let infos = describe(&candidate(1, "T00000001"), &[existing(2, "T00000001")]);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].side, ConflictSide::Teacher);
        assert_eq!(infos[0].schedule_id, 7);
        assert_eq!(infos[0].start_time, t(10, 0));
    }
}
