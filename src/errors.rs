//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_autograd_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AutogradError {
            $($variant(String),)*
        }

        impl AutogradError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AutogradError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AutogradError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(AutogradError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AutogradError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AutogradError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AutogradError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_autograd_errors! {
    Binding("E001", "Binding Error", BAD_REQUEST),
    Validation("E002", "Validation Error", BAD_REQUEST),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    DatabaseConstraint("E006", "Database Constraint Error", UNPROCESSABLE_ENTITY),
    FileOperation("E007", "File Operation Error", INTERNAL_SERVER_ERROR),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    PayloadTooLarge("E010", "Payload Too Large", PAYLOAD_TOO_LARGE),
    UnsupportedFileType("E011", "Unsupported File Type", UNSUPPORTED_MEDIA_TYPE),
}

impl AutogradError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AutogradError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AutogradError {}

/// 统一的错误响应体：`{"error": ..., "code": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&AutogradError> for ErrorResponse {
    fn from(err: &AutogradError) -> Self {
        Self {
            error: err.message().to_string(),
            code: err.code(),
        }
    }
}

impl ResponseError for AutogradError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorResponse::from(self))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AutogradError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                AutogradError::DatabaseConstraint(msg)
            }
            _ => AutogradError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AutogradError {
    fn from(err: std::io::Error) -> Self {
        AutogradError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AutogradError {
    fn from(err: serde_json::Error) -> Self {
        AutogradError::Serialization(err.to_string())
    }
}

impl From<base64::DecodeError> for AutogradError {
    fn from(err: base64::DecodeError) -> Self {
        AutogradError::Validation(format!("文件内容不是合法的 base64: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, AutogradError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AutogradError::binding("test").code(), "E001");
        assert_eq!(AutogradError::validation("test").code(), "E002");
        assert_eq!(AutogradError::database_constraint("test").code(), "E006");
        assert_eq!(AutogradError::not_found("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AutogradError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            AutogradError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            AutogradError::binding("bad json").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AutogradError::database_constraint("fk").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AutogradError::payload_too_large("big").status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AutogradError::database_operation("down").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message() {
        let err = AutogradError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = AutogradError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }

    #[test]
    fn test_error_response_body() {
        let err = AutogradError::not_found("upload missing");
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(body["error"], "upload missing");
        assert_eq!(body["code"], "E008");
    }

    #[test]
    fn test_custom_db_error_is_operation_error() {
        let err: AutogradError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E005");
    }
}
