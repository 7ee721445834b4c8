//! API Response Envelope
//!
//! Every successful response body has the shape
//! `{ "status": <u16>, "data": <T>, "message": <string> }`.
//! Errors use [`AppError`](crate::error::app_error::AppError) instead.

use serde::Serialize;

/// 成功レスポンスの共通エンベロープ
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status,
            data,
            message: message.into(),
        }
    }

    /// 200 OK
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, data, message)
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Empty `data` payload, serialized as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = ApiResponse::created(serde_json::json!({ "username": "bob" }), "ok");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 201);
        assert_eq!(json["data"]["username"], "bob");
        assert_eq!(json["message"], "ok");
        assert!(body.is_success());
    }

    #[test]
    fn test_empty_data_serializes_as_object() {
        let body = ApiResponse::ok(Empty {}, "User logged out");
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""data":{}"#));
    }
}
