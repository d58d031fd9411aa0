use rocket::{catch, serde::json::Json, Request};
use shared::models::ErrorMessage;

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorMessage> {
    Json(ErrorMessage {
        error: "Invalid request parameters.".into(),
        status: 400,
    })
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorMessage> {
    Json(ErrorMessage {
        error: "The requested resource was not found.".into(),
        status: 404,
    })
}

#[catch(422)]
pub fn unprocessable_entity(_req: &Request) -> Json<ErrorMessage> {
    Json(ErrorMessage {
        error: "The request body could not be understood.".into(),
        status: 422,
    })
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorMessage> {
    Json(ErrorMessage {
        error: "An internal server error occurred.".into(),
        status: 500,
    })
}
