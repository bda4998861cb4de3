use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::{ErrorResponse, failure_message};

use crate::analysis::AnalysisError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Upload(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upload(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(AnalysisError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Analysis(AnalysisError::Classification(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: failure_message(self),
        })
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ApiError::Upload(format!("could not read upload: {}", err))
    }
}
