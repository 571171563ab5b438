use serde::{Deserialize, Serialize};
use ts_rs::TS;

// A weekly unit inside a learning path, optionally date-gated.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct Lesson {
    pub id: i64,
    // Learning paths are keyed by their owning course.
    pub lp_id: String,
    pub part_id: i64,
    pub name: String,
    pub video_url: Option<String>,
    // None means always unlocked.
    pub available_from: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Lesson {
    /// A lesson unlocks on its `available_from` date; none means always.
    pub fn is_unlocked_on(&self, date: chrono::NaiveDate) -> bool {
        match self.available_from {
            Some(from) => from <= date,
            None => true,
        }
    }

    /// Position within a learning path: dated lessons first by date, undated
    /// ones last, id as the final tie-break. Week numbering follows this.
    pub fn delivery_order(&self) -> (bool, Option<chrono::NaiveDate>, i64) {
        (self.available_from.is_none(), self.available_from, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lesson(available_from: Option<NaiveDate>) -> Lesson {
        Lesson {
            id: 1,
            lp_id: "TOEIC500".into(),
            part_id: 5,
            name: "Week 1".into(),
            video_url: None,
            available_from,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_unlock_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(lesson(None).is_unlocked_on(today));
        assert!(lesson(Some(today)).is_unlocked_on(today));
        assert!(!lesson(Some(today.succ_opt().unwrap())).is_unlocked_on(today));
    }

    #[test]
    fn test_delivery_order_puts_undated_lessons_last() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 6, day);

        let mut undated = lesson(None);
        undated.id = 1;
        let mut week2 = lesson(d(8));
        week2.id = 2;
        let mut week1 = lesson(d(1));
        week1.id = 3;

        let mut lessons = vec![undated, week2, week1];
        lessons.sort_by_key(|l| l.delivery_order());
        let ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_delivery_order_breaks_date_ties_by_id() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1);
        let mut a = lesson(date);
        a.id = 7;
        let mut b = lesson(date);
        b.id = 4;
        assert!(b.delivery_order() < a.delivery_order());
    }
}
