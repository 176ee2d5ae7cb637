use chrono::{DateTime, Utc};

/// 待上传的文件（来自请求）
#[derive(Debug, Clone, PartialEq)]
pub struct NewUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    // base64 编码的文件内容
    pub content: String,
}

/// 已落盘、待写入数据库的文件元数据
#[derive(Debug, Clone, PartialEq)]
pub struct NewStoredUpload {
    pub stored_name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub file_size: i64,
    pub file_url: String,
}

/// 数据库中的文件元数据
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub id: i64,
    pub stored_name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub file_size: i64,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// 上传完成后的业务实体：请求字段 + 服务端生成的字段
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub id: i64,
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: String,
    pub file_url: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl Upload {
    pub fn from_parts(request: NewUpload, stored: StoredUpload) -> Self {
        Self {
            id: stored.id,
            file_name: request.file_name,
            content_type: request.content_type,
            content: request.content,
            file_url: stored.file_url,
            size: stored.file_size,
            uploaded_at: stored.uploaded_at,
        }
    }
}
