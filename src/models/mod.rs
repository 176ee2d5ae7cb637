//! 数据模型定义
//!
//! - `entities`: 业务实体
//! - `requests`: HTTP 请求体
//! - `responses`: HTTP 响应体

pub mod common;
pub mod submissions;
pub mod uploads;

pub use common::cursor::{Cursor, CursorQuery, CursorResponse, SortDirection};
