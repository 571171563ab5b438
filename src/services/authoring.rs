//! Shared helpers for teacher-facing content authoring.

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::models::ApiResponse;
use crate::models::assessments::requests::{ChoiceSpec, ItemPayload, ItemSpec};
use crate::models::users::entities::{Principal, Role};
use crate::storage::Storage;
use crate::utils::validate::{MediaKind, validate_media_path};

/// Teachers may only touch classes they have at least one scheduled session
/// in; admins bypass the ownership check.
pub(crate) async fn ensure_owns_class(
    storage: &Arc<dyn Storage>,
    principal: &Principal,
    class_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_class(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                "NOT_FOUND",
                format!("Class {class_id} not found"),
            )));
        }
        Err(e) => return Err(crate::models::respond_err(&e)),
    }

    if principal.role == Role::Admin {
        return Ok(());
    }

    match storage.teacher_owns_class(&principal.id, class_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            "AUTHORIZATION",
            "You are not assigned to this class",
        ))),
        Err(e) => Err(crate::models::respond_err(&e)),
    }
}

/// Validate an authored question set and lower it to storage specs.
///
/// Every item needs a non-empty question and at least one correct choice;
/// media paths must sit under an allowed public prefix. Missing orders are
/// filled from the list position.
pub(crate) fn validate_item_payloads(items: Vec<ItemPayload>) -> Result<Vec<ItemSpec>, String> {
    if items.is_empty() {
        return Err("At least one item is required".to_string());
    }

    let mut specs = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let position = index + 1;

        if item.question_text.trim().is_empty() {
            return Err(format!("Item {position}: question text is required"));
        }

        if item.choices.is_empty() {
            return Err(format!("Item {position}: at least one choice is required"));
        }

        if !item.choices.iter().any(|c| c.is_correct) {
            return Err(format!("Item {position}: at least one choice must be correct"));
        }

        if let Some(ref path) = item.image_path {
            validate_media_path(MediaKind::Image, path)
                .map_err(|e| format!("Item {position}: {e}"))?;
        }
        if let Some(ref path) = item.audio_path {
            validate_media_path(MediaKind::Audio, path)
                .map_err(|e| format!("Item {position}: {e}"))?;
        }

        specs.push(ItemSpec {
            part_id: item.part_id,
            order_in_part: item.order.unwrap_or(position as i32),
            question_text: item.question_text,
            stimulus_text: item.stimulus_text,
            image_path: item.image_path,
            audio_path: item.audio_path,
            choices: item
                .choices
                .into_iter()
                .map(|c| ChoiceSpec {
                    label: c.label,
                    content: c.content,
                    is_correct: c.is_correct,
                })
                .collect(),
        });
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::requests::ChoicePayload;

    fn item(correct: bool) -> ItemPayload {
        ItemPayload {
            part_id: 5,
            order: None,
            question_text: "Choose the best answer.".into(),
            stimulus_text: None,
            image_path: None,
            audio_path: None,
            choices: vec![
                ChoicePayload {
                    label: "A".into(),
                    content: "went".into(),
                    is_correct: correct,
                },
                ChoicePayload {
                    label: "B".into(),
                    content: "gone".into(),
                    is_correct: false,
                },
            ],
        }
    }

    #[test]
    fn test_requires_a_correct_choice() {
        assert!(validate_item_payloads(vec![item(true)]).is_ok());
        let err = validate_item_payloads(vec![item(false)]).unwrap_err();
        assert!(err.contains("correct"));
    }

    #[test]
    fn test_rejects_empty_sets() {
        assert!(validate_item_payloads(Vec::new()).is_err());

        let mut empty_question = item(true);
        empty_question.question_text = "   ".into();
        assert!(validate_item_payloads(vec![empty_question]).is_err());

        let mut no_choices = item(true);
        no_choices.choices.clear();
        assert!(validate_item_payloads(vec![no_choices]).is_err());
    }

    #[test]
    fn test_fills_missing_order_from_position() {
        let mut second = item(true);
        second.order = Some(10);
        let specs = validate_item_payloads(vec![item(true), second]).unwrap();
        assert_eq!(specs[0].order_in_part, 1);
        assert_eq!(specs[1].order_in_part, 10);
    }
}
