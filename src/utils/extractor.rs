//! Path parameter extractors that fail with a uniform 400 envelope instead of
//! actix's default plain-text error.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, error::ErrorBadRequest};
use futures_util::future::{Ready, ready};

use crate::models::ApiResponse;

macro_rules! define_safe_i64_extractors {
    ($(
        $name:ident($param:literal)
    ),* $(,)?) => {
        $(
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    let parsed = req
                        .match_info()
                        .get($param)
                        .and_then(|raw| raw.parse::<i64>().ok())
                        .filter(|id| *id > 0);

                    ready(match parsed {
                        Some(id) => Ok($name(id)),
                        None => Err(ErrorBadRequest(
                            serde_json::to_string(&ApiResponse::<()>::error_empty(
                                "VALIDATION",
                                format!("Invalid {} path parameter", $param),
                            ))
                            .unwrap_or_default(),
                        )),
                    })
                }
            }
        )*
    };
}

define_safe_i64_extractors! {
    SafeClassIdI64("class_id"),
    SafeRoomIdI64("room_id"),
    SafeScheduleIdI64("schedule_id"),
    SafeLessonIdI64("lesson_id"),
    SafeTestIdI64("test_id"),
}
