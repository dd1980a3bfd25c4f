use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use timber_market_engine::MarketGatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("{0}")]
    BackendError(#[from] MarketGatewayError),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Could not store uploaded file: {0}")]
    UploadError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BackendError(e) => match e {
                MarketGatewayError::ValidationError(_) => StatusCode::BAD_REQUEST,
                MarketGatewayError::NotFound(_) => StatusCode::NOT_FOUND,
                MarketGatewayError::InsufficientStock { .. } => StatusCode::CONFLICT,
                MarketGatewayError::Conflict(_) => StatusCode::CONFLICT,
                MarketGatewayError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::UploadError(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "success": false, "message": self.to_string() }).to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn backend_errors_map_to_statuses() {
        let cases = [
            (MarketGatewayError::validation("bad"), StatusCode::BAD_REQUEST),
            (MarketGatewayError::not_found("order"), StatusCode::NOT_FOUND),
            (MarketGatewayError::conflict("nope"), StatusCode::CONFLICT),
            (MarketGatewayError::InsufficientStock { items: vec!["clock".into()] }, StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status_code(), status);
        }
    }

    #[test]
    fn error_body_is_a_failure_envelope() {
        let err = ServerError::from(MarketGatewayError::InsufficientStock { items: vec!["Wall clock".into()] });
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
