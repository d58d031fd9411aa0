use rocket::http::Status;
use rocket::response::Responder;
use shared::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No result found")]
    NoSearchResult,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    InvalidCriteria(#[from] ValidationError),
    #[error("Internal server error")]
    Database(String),
    #[error("Internal server error")]
    Export(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = match self {
            ApiError::NoSearchResult => Status::NotFound,
            ApiError::NotFound => Status::NotFound,
            ApiError::InvalidCriteria(_) => Status::BadRequest,
            ApiError::Database(_) => Status::InternalServerError,
            ApiError::Export(_) => Status::InternalServerError,
        };

        rocket::Response::build_from(self.to_string().respond_to(req)?)
            .status(status)
            .ok()
    }
}
