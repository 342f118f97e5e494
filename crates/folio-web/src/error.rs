use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use folio_core::FolioError;

#[expect(
    clippy::needless_pass_by_value,
    reason = "handlers naturally own error values from `Result` and pass them through"
)]
pub fn folio_error_response(err: FolioError, operation: &str, slug: Option<String>) -> Response {
    let status = status_for_folio_error(&err);
    let payload = err.to_payload(operation.to_string(), slug);
    (status, Json(payload)).into_response()
}

fn status_for_folio_error(err: &FolioError) -> StatusCode {
    match err {
        FolioError::NotFound(_) => StatusCode::NOT_FOUND,
        FolioError::Validation(_) | FolioError::Config(_) => StatusCode::BAD_REQUEST,
        FolioError::AssistantDisabled => StatusCode::SERVICE_UNAVAILABLE,
        FolioError::AssistantUpstream(_) | FolioError::Http(_) => StatusCode::BAD_GATEWAY,
        FolioError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        FolioError::Io(_)
        | FolioError::Json(_)
        | FolioError::Yaml(_)
        | FolioError::Toml(_)
        | FolioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
