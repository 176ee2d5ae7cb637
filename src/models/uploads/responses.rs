use serde::Serialize;

use super::entities::Upload;

/// 上传响应：原样回显请求字段，并附带服务端生成的字段
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub content: String,
    pub id: i64,
    pub file_url: String,
    pub size: i64,
    pub uploaded_at: String,
}

impl From<Upload> for UploadResponse {
    fn from(upload: Upload) -> Self {
        Self {
            file_name: upload.file_name,
            content_type: upload.content_type,
            content: upload.content,
            id: upload.id,
            file_url: upload.file_url,
            size: upload.size,
            uploaded_at: upload.uploaded_at.to_rfc3339(),
        }
    }
}
