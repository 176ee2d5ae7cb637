use serde::Deserialize;

use super::entities::NewUpload;

/// 上传请求，`content` 为 base64 编码的文件内容
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    pub content: String,
}

impl From<UploadRequest> for NewUpload {
    fn from(req: UploadRequest) -> Self {
        Self {
            file_name: req.file_name,
            content_type: req.content_type,
            content: req.content,
        }
    }
}
