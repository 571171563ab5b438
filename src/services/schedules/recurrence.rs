//! Expansion of recurrence rules into concrete session dates.

use chrono::{Datelike, NaiveDate};

use crate::models::schedules::requests::RecurrenceType;
use crate::utils::datetime::weekday_from_sunday_index;

/// Expand a recurrence over the inclusive `[from, to]` range.
///
/// Daily yields every date. Weekly yields the dates whose weekday is in
/// `weekdays` (Sunday-first indexes); an empty or missing weekday set is a
/// caller error surfaced as `Err`.
pub fn expand(
    recurrence: RecurrenceType,
    from: NaiveDate,
    to: NaiveDate,
    weekdays: Option<&[u8]>,
) -> Result<Vec<NaiveDate>, String> {
    if from > to {
        return Err("Recurrence range start is after its end".to_string());
    }

    match recurrence {
        RecurrenceType::Daily => Ok(date_range(from, to).collect()),
        RecurrenceType::Weekly => {
            let indexes = weekdays.unwrap_or(&[]);
            if indexes.is_empty() {
                return Err("Weekly recurrence requires at least one weekday".to_string());
            }
            let mut wanted = Vec::with_capacity(indexes.len());
            for &index in indexes {
                match weekday_from_sunday_index(index) {
                    Some(weekday) => wanted.push(weekday),
                    None => return Err(format!("Invalid weekday index {index}, expected 0-6")),
                }
            }
            Ok(date_range(from, to)
                .filter(|date| wanted.contains(&date.weekday()))
                .collect())
        }
    }
}

fn date_range(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(from), move |date| {
        date.succ_opt().filter(|next| *next <= to)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_expansion() {
        let dates = expand(RecurrenceType::Daily, d(2025, 1, 6), d(2025, 1, 9), None).unwrap();
        assert_eq!(
            dates,
            vec![d(2025, 1, 6), d(2025, 1, 7), d(2025, 1, 8), d(2025, 1, 9)]
        );
    }

    #[test]
    fn test_weekly_monday_wednesday() {
        // Mondays and Wednesdays between 2025-01-06 and 2025-01-26.
        let dates = expand(
            RecurrenceType::Weekly,
            d(2025, 1, 6),
            d(2025, 1, 26),
            Some(&[1, 3]),
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![
                d(2025, 1, 6),
                d(2025, 1, 8),
                d(2025, 1, 13),
                d(2025, 1, 15),
                d(2025, 1, 20),
                d(2025, 1, 22),
            ]
        );
    }

    #[test]
    fn test_single_day_range() {
        let dates = expand(RecurrenceType::Daily, d(2025, 1, 6), d(2025, 1, 6), None).unwrap();
        assert_eq!(dates, vec![d(2025, 1, 6)]);
    }

    #[test]
    fn test_weekly_rejects_bad_input() {
        assert!(expand(RecurrenceType::Weekly, d(2025, 1, 6), d(2025, 1, 26), None).is_err());
        assert!(
            expand(
                RecurrenceType::Weekly,
                d(2025, 1, 6),
                d(2025, 1, 26),
                Some(&[7])
            )
            .is_err()
        );
        assert!(expand(RecurrenceType::Daily, d(2025, 1, 9), d(2025, 1, 6), None).is_err());
    }
}
