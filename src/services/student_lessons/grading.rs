//! Choice grading shared by lesson quizzes and test submissions.

use std::collections::HashMap;

use crate::models::assessments::entities::{Choice, Item, PerItemResult};
use crate::models::assessments::requests::ResponseEntry;

#[derive(Debug, Clone)]
pub struct GradeOutcome {
    pub answered: i32,
    pub correct: i32,
    pub total: i32,
    pub percentage: f64,
    pub score_out_of_10: f64,
    pub breakdown: Vec<PerItemResult>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grade a response set against the item set. Unanswered or unknown items
/// count as wrong; responses naming items outside the set are ignored.
pub fn grade(items: &[(Item, Vec<Choice>)], responses: &[ResponseEntry]) -> GradeOutcome {
    let selected: HashMap<i64, i64> = responses
        .iter()
        .filter_map(|entry| Some((entry.item_id?, entry.choice_id?)))
        .collect();

    let mut answered = 0;
    let mut correct = 0;
    let mut breakdown = Vec::with_capacity(items.len());

    for (item, choices) in items {
        let correct_choice_id = choices.iter().find(|c| c.is_correct).map(|c| c.id);
        let selected_choice_id = selected.get(&item.id).copied();
        if selected_choice_id.is_some() {
            answered += 1;
        }
        let is_correct = match (selected_choice_id, correct_choice_id) {
            (Some(chosen), Some(right)) => chosen == right,
            _ => false,
        };
        if is_correct {
            correct += 1;
        }
        breakdown.push(PerItemResult {
            item_id: item.id,
            selected_choice_id,
            correct_choice_id,
            is_correct,
        });
    }

    let total = items.len() as i32;
    let percentage = if total > 0 {
        round2(f64::from(correct) / f64::from(total) * 100.0)
    } else {
        0.0
    };

    GradeOutcome {
        answered,
        correct,
        total,
        percentage,
        score_out_of_10: round2(percentage / 10.0),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, correct_choice: i64) -> (Item, Vec<Choice>) {
        let choices = (1..=4)
            .map(|n| Choice {
                id: id * 10 + n,
                item_id: id,
                label: char::from(b'A' + (n - 1) as u8).to_string(),
                content: format!("option {n}"),
                is_correct: id * 10 + n == correct_choice,
            })
            .collect();
        (
            Item {
                id,
                part_id: 5,
                test_id: None,
                lesson_id: Some(1),
                item_group_key: Some("lesson-1".into()),
                question_text: format!("question {id}"),
                stimulus_text: None,
                image_path: None,
                audio_path: None,
                order_in_part: id as i32,
            },
            choices,
        )
    }

    fn answer(item_id: i64, choice_id: i64) -> ResponseEntry {
        ResponseEntry {
            item_id: Some(item_id),
            choice_id: Some(choice_id),
        }
    }

    #[test]
    fn test_three_of_four_correct() {
        let items = vec![item(1, 11), item(2, 22), item(3, 33), item(4, 44)];
        let responses = vec![
            answer(1, 11),
            answer(2, 22),
            answer(3, 33),
            answer(4, 41), // wrong
        ];
        let outcome = grade(&items, &responses);
        assert_eq!(outcome.answered, 4);
        assert_eq!(outcome.correct, 3);
        assert_eq!(outcome.total, 4);
        assert_eq!(outcome.percentage, 75.0);
        assert_eq!(outcome.score_out_of_10, 7.5);
        assert_eq!(outcome.breakdown.len(), 4);
        assert!(!outcome.breakdown[3].is_correct);
    }

    #[test]
    fn test_unanswered_counts_wrong() {
        let items = vec![item(1, 11), item(2, 22)];
        let outcome = grade(&items, &[answer(1, 11)]);
        assert_eq!(outcome.answered, 1);
        assert_eq!(outcome.correct, 1);
        assert_eq!(outcome.percentage, 50.0);
        assert_eq!(outcome.breakdown[1].selected_choice_id, None);
    }

    #[test]
    fn test_unknown_item_ignored() {
        let items = vec![item(1, 11)];
        let outcome = grade(&items, &[answer(99, 1), answer(1, 11)]);
        assert_eq!(outcome.answered, 1);
        assert_eq!(outcome.correct, 1);
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn test_empty_item_set() {
        let outcome = grade(&[], &[]);
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.percentage, 0.0);
        assert_eq!(outcome.score_out_of_10, 0.0);
    }

    #[test]
    fn test_rounding_two_decimals() {
        // 1 of 3 correct: 33.333... rounds to 33.33 and 3.33.
        let items = vec![item(1, 11), item(2, 22), item(3, 33)];
        let outcome = grade(&items, &[answer(1, 11)]);
        assert_eq!(outcome.percentage, 33.33);
        assert_eq!(outcome.score_out_of_10, 3.33);
    }
}
