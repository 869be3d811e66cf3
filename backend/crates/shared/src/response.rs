//! Response Envelope - Uniform JSON wrapper for every API response
//!
//! `{status, message, data?, errors?, meta?}`

use std::borrow::Cow;

use serde::Serialize;

use crate::error::app_error::AppError;

/// レスポンスの成否
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// コレクション応答に付与されるメタ情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseMeta {
    pub total: usize,
}

/// API レスポンスエンベロープ
///
/// `data` の型はクレートごとの閉じたペイロード列挙体（`AuthPayload`, `TodoPayload`）です。
/// HTTP ステータスコードはシリアライズされず、`IntoResponse` でのみ使用されます。
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::ok("todos fetched", vec![1, 2, 3]).with_total(3);
/// let json = serde_json::to_value(&res).unwrap();
/// assert_eq!(json["status"], "success");
/// assert_eq!(json["meta"]["total"], 3);
/// assert!(json.get("errors").is_none());
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip)]
    status_code: u16,
}

impl<T> ApiResponse<T> {
    fn success(status_code: u16, message: impl Into<Cow<'static, str>>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data,
            errors: None,
            meta: None,
            status_code,
        }
    }

    /// 200 OK
    pub fn ok(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::success(200, message, Some(data))
    }

    /// 201 Created
    pub fn created(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::success(201, message, Some(data))
    }

    /// 200 OK（`data` なし）
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::success(200, message, None)
    }

    /// コレクションの件数を `meta.total` に設定
    pub fn with_total(mut self, total: usize) -> Self {
        self.meta = Some(ResponseMeta { total });
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl ApiResponse<()> {
    /// エラーエンベロープを構築
    ///
    /// サーバーエラーの内部メッセージは [`AppError::into_public_parts`] によって隠されます。
    pub fn from_error(err: AppError) -> Self {
        let status_code = err.status_code();
        let (message, details) = err.into_public_parts();
        Self {
            status: ResponseStatus::Error,
            message,
            data: None,
            errors: (!details.is_empty()).then_some(details),
            meta: None,
            status_code,
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let res = ApiResponse::created("user registered", serde_json::json!({"id": 1}));
        assert_eq!(res.status_code(), 201);

        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "user registered");
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("errors").is_none());
        assert!(json.get("meta").is_none());
        assert!(json.get("status_code").is_none());
    }

    #[test]
    fn test_empty_collection_is_array() {
        let res = ApiResponse::ok("todos fetched", Vec::<u8>::new()).with_total(0);
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["meta"]["total"], 0);
    }

    #[test]
    fn test_message_only() {
        let res = ApiResponse::<()>::message("todo deleted");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(res.status_code(), 200);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::bad_request("invalid payload").with_detail("title is required");
        let res = ApiResponse::from_error(err);
        assert_eq!(res.status_code(), 400);

        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "invalid payload");
        assert_eq!(json["errors"], serde_json::json!(["title is required"]));
    }

    #[test]
    fn test_error_envelope_hides_internal_message() {
        let res = ApiResponse::from_error(AppError::internal("pq: relation does not exist"));
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["message"], "Internal Server Error");
        assert!(json.get("errors").is_none());
    }
}
