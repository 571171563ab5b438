//! Scoreboard reduction over the append-only attempt log.

use std::collections::HashMap;

use crate::models::assessments::entities::{Attempt, ResponsesBlob};
use crate::models::assessments::responses::{AttemptBrief, ScoreboardRow};
use crate::models::enrollments::entities::EnrollmentStatus;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The cached question count can be stale on old rows; a live item count
/// takes over when the cache is unusable.
pub fn effective_total(cached: i32, live_count: i64) -> i32 {
    if cached > 0 { cached } else { live_count as i32 }
}

fn percent(score: i32, total: i32) -> f64 {
    if total > 0 {
        round2(f64::from(score) / f64::from(total) * 100.0)
    } else {
        0.0
    }
}

fn score_10(correct: i32, total: i32) -> f64 {
    if total > 0 {
        round2(f64::from(correct) / f64::from(total) * 10.0)
    } else {
        0.0
    }
}

/// Correct count and percentage of one attempt. The responses blob is
/// authoritative when present (legacy rows may carry a blob but no
/// `raw_score`); otherwise both derive from `raw_score` and the total.
fn attempt_scores(attempt: &Attempt, total_questions: i32) -> (i32, f64) {
    if let Some(blob) = attempt
        .responses_json
        .as_deref()
        .and_then(|raw| serde_json::from_str::<ResponsesBlob>(raw).ok())
    {
        return (blob.correct_count, round2(blob.percentage));
    }

    let score = attempt.raw_score.unwrap_or(0);
    (score, percent(score, total_questions))
}

/// Fold attempts into one row per student: best score across N attempts,
/// the per-attempt history newest first, and the latest submission time.
/// Rows sort by display name, falling back to student id.
pub fn aggregate(
    attempts: &[Attempt],
    total_questions: i32,
    names: &HashMap<String, String>,
    statuses: &HashMap<String, EnrollmentStatus>,
) -> Vec<ScoreboardRow> {
    let mut per_student: HashMap<String, Vec<&Attempt>> = HashMap::new();
    for attempt in attempts {
        per_student
            .entry(attempt.student_id.clone())
            .or_default()
            .push(attempt);
    }

    let mut rows: Vec<ScoreboardRow> = per_student
        .into_iter()
        .map(|(student_id, mut attempts)| {
            // Never-submitted attempts sink to the end.
            attempts.sort_by(|a, b| match (b.submitted_at, a.submitted_at) {
                (Some(b_time), Some(a_time)) => b_time.cmp(&a_time),
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, Some(_)) => std::cmp::Ordering::Less,
                (None, None) => a.att_id.cmp(&b.att_id),
            });

            let briefs: Vec<AttemptBrief> = attempts
                .iter()
                .map(|attempt| {
                    let (correct, percentage) = attempt_scores(attempt, total_questions);
                    AttemptBrief {
                        att_id: attempt.att_id,
                        submitted_at: attempt.submitted_at.map(|t| t.to_rfc3339()),
                        correct,
                        percentage,
                        score_10: score_10(correct, total_questions),
                    }
                })
                .collect();

            let best_score = briefs.iter().map(|b| b.correct).max().unwrap_or(0);
            let best_percentage = briefs
                .iter()
                .map(|b| b.percentage)
                .fold(0.0_f64, f64::max);
            let last_submitted_at = attempts
                .iter()
                .filter_map(|attempt| attempt.submitted_at)
                .max()
                .map(|t| t.to_rfc3339());

            ScoreboardRow {
                student_name: names.get(&student_id).cloned(),
                enrollment_status: statuses.get(&student_id).copied(),
                attempt_count: briefs.len() as i32,
                best_score,
                best_percentage,
                best_score_10: score_10(best_score, total_questions),
                last_submitted_at,
                attempts: briefs,
                student_id,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        let a_key = a.student_name.as_deref().unwrap_or(&a.student_id);
        let b_key = b.student_name.as_deref().unwrap_or(&b.student_id);
        a_key.cmp(b_key).then_with(|| a.student_id.cmp(&b.student_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn attempt(att_id: i64, student: &str, score: i32, hour: u32) -> Attempt {
        Attempt {
            att_id,
            test_id: 1,
            student_id: student.to_string(),
            class_id: 1,
            started_at: None,
            submitted_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()),
            raw_score: Some(score),
            status: "submitted".to_string(),
            responses_json: None,
        }
    }

    #[test]
    fn test_best_of_two_attempts() {
        let attempts = vec![
            attempt(1, "S00000001", 6, 9),
            attempt(2, "S00000001", 8, 14),
        ];
        let rows = aggregate(&attempts, 10, &HashMap::new(), &HashMap::new());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.attempt_count, 2);
        assert_eq!(row.best_score, 8);
        assert_eq!(row.best_percentage, 80.0);
        assert_eq!(row.best_score_10, 8.0);
        // Last submission wins the timestamp even though it is not the best.
        assert_eq!(
            row.last_submitted_at.as_deref(),
            Some("2025-03-01T14:00:00+00:00")
        );
        // History is newest first.
        assert_eq!(row.attempts[0].att_id, 2);
        assert_eq!(row.attempts[1].att_id, 1);
        assert_eq!(row.attempts[0].percentage, 80.0);
    }

    #[test]
    fn test_blob_scores_legacy_rows_without_raw_score() {
        let mut legacy = attempt(1, "S00000001", 0, 9);
        legacy.raw_score = None;
        legacy.responses_json = Some(r#"{"correct_count":6,"percentage":60.0}"#.to_string());
        let rows = aggregate(&[legacy], 10, &HashMap::new(), &HashMap::new());
        assert_eq!(rows[0].best_score, 6);
        assert_eq!(rows[0].best_percentage, 60.0);
        assert_eq!(rows[0].attempts[0].correct, 6);
        assert_eq!(rows[0].attempts[0].score_10, 6.0);
    }

    #[test]
    fn test_blob_takes_precedence_over_raw_score() {
        let mut tagged = attempt(1, "S00000001", 3, 9);
        tagged.responses_json =
            Some(r#"{"version":1,"correct_count":7,"percentage":70.0,"per_item":[]}"#.to_string());
        let rows = aggregate(&[tagged], 10, &HashMap::new(), &HashMap::new());
        assert_eq!(rows[0].best_score, 7);
        assert_eq!(rows[0].best_percentage, 70.0);
    }

    #[test]
    fn test_rows_sorted_by_display_name() {
        let attempts = vec![
            attempt(1, "S00000001", 9, 9),
            attempt(2, "S00000002", 4, 10),
        ];
        let names = HashMap::from([
            ("S00000001".to_string(), "Zung".to_string()),
            ("S00000002".to_string(), "Anh".to_string()),
        ]);
        let rows = aggregate(&attempts, 10, &names, &HashMap::new());
        let order: Vec<&str> = rows.iter().map(|r| r.student_id.as_str()).collect();
        // Name order beats score order.
        assert_eq!(order, vec!["S00000002", "S00000001"]);
    }

    #[test]
    fn test_unnamed_rows_fall_back_to_student_id() {
        let attempts = vec![
            attempt(1, "S00000009", 9, 9),
            attempt(2, "S00000001", 4, 10),
        ];
        let rows = aggregate(&attempts, 10, &HashMap::new(), &HashMap::new());
        let order: Vec<&str> = rows.iter().map(|r| r.student_id.as_str()).collect();
        assert_eq!(order, vec!["S00000001", "S00000009"]);
    }

    #[test]
    fn test_zero_total_yields_zero_percentages() {
        let attempts = vec![attempt(1, "S00000001", 5, 9)];
        let rows = aggregate(&attempts, 0, &HashMap::new(), &HashMap::new());
        assert_eq!(rows[0].best_percentage, 0.0);
    }

    #[test]
    fn test_effective_total_falls_back_to_live_count() {
        assert_eq!(effective_total(10, 12), 10);
        assert_eq!(effective_total(0, 12), 12);
        assert_eq!(effective_total(-1, 12), 12);
    }

    #[test]
    fn test_name_and_status_joins() {
        let attempts = vec![attempt(1, "S00000001", 7, 9)];
        let names = HashMap::from([("S00000001".to_string(), "Tran Thi B".to_string())]);
        let statuses = HashMap::from([("S00000001".to_string(), EnrollmentStatus::Dropped)]);
        let rows = aggregate(&attempts, 10, &names, &statuses);
        assert_eq!(rows[0].student_name.as_deref(), Some("Tran Thi B"));
        assert_eq!(rows[0].enrollment_status, Some(EnrollmentStatus::Dropped));
    }
}
