use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use popboard_core::CoreError;

use crate::api::dto::ErrorOut;

/// User-facing messages, one per endpoint.
pub const LIST_FAILED: &str = "팝업 목록을 불러올 수 없습니다.";
pub const SAVE_FAILED: &str = "팝업을 저장할 수 없습니다.";
pub const DELETE_FAILED: &str = "팝업을 삭제할 수 없습니다.";
pub const ACTIVE_FAILED: &str = "활성 팝업을 불러올 수 없습니다.";

/// A store failure on its way out as a 500.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    source: CoreError,
}

impl ApiError {
    pub fn with(message: &'static str) -> impl FnOnce(CoreError) -> Self {
        move |source| Self { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.source, "{}", self.message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorOut {
                error: self.message,
            }),
        )
            .into_response()
    }
}
