use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RepurposerError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    #[error("API error from {api}: {message}")]
    Api { api: String, message: String },

    #[error("API JSON error from {api}: {source}")]
    ApiJson {
        api: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for RepurposerError {
    fn into_response(self) -> Response {
        let status = match &self {
            RepurposerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::RepurposerError;

    #[test]
    fn api_error_display_includes_api_name() {
        let err = RepurposerError::Api {
            api: "pubchem".to_string(),
            message: "HTTP 503".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("pubchem"));
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn invalid_argument_display_keeps_message() {
        let err = RepurposerError::InvalidArgument("drug name is required".to_string());
        assert!(err.to_string().contains("drug name is required"));
    }

    #[test]
    fn pdf_error_display_keeps_message() {
        let err = RepurposerError::Pdf("font load failed".to_string());
        let msg = err.to_string();
        assert!(msg.contains("PDF error"));
        assert!(msg.contains("font load failed"));
    }
}
