//! 请求参数绑定错误处理
//!
//! 将 actix 提取器的失败统一转换为 `Binding` 错误，返回 `{"error", "code"}` 结构。

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest};

use crate::errors::AutogradError;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "JSON 请求体绑定失败");
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            return AutogradError::payload_too_large(format!("请求体过大: {err}")).into();
        }
        _ => format!("请求体格式错误: {err}"),
    };
    AutogradError::binding(message).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "查询参数绑定失败");
    AutogradError::binding(format!("查询参数错误: {err}")).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "路径参数绑定失败");
    AutogradError::binding(format!("路径参数错误: {err}")).into()
}
