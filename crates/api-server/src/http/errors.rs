use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::inputs::InputError;
use shared::models::{ErrorBody, ErrorResponse};
use shared::session::SessionError;
use shared::upload::UploadError;

pub(super) const IMAGE_RETRY_HINT: &str =
    "Please try with a different image or consult a healthcare provider";

fn error_response(status: StatusCode, code: &str, message: &str, hint: Option<&str>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                hint: hint.map(ToString::to_string),
            },
        }),
    )
        .into_response()
}

pub(super) fn bad_request_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, code, message, None)
}

pub(super) fn bad_gateway_response(code: &str, message: &str, hint: Option<&str>) -> Response {
    error_response(StatusCode::BAD_GATEWAY, code, message, hint)
}

pub(super) fn not_found_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, code, message, None)
}

pub(super) fn invalid_input_response(err: InputError) -> Response {
    bad_request_response("invalid_input", &err.to_string())
}

pub(super) fn session_error_response(err: SessionError) -> Response {
    match err {
        SessionError::NotFound => {
            not_found_response("session_not_found", "Session not found or expired")
        }
    }
}

pub(super) fn upload_error_response(err: UploadError) -> Response {
    match err {
        UploadError::UnsupportedImageType(_) | UploadError::UnsupportedReportType(_) => {
            bad_request_response("unsupported_file_type", &err.to_string())
        }
        other => bad_request_response("invalid_upload", &other.to_string()),
    }
}

pub(super) fn json_rejection_response(rejection: JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return bad_request_response("invalid_upload", "Request body exceeds the upload limit");
    }
    bad_request_response("invalid_input", &rejection.body_text())
}
