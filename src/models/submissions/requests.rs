use serde::Deserialize;

use super::entities::NewSubmission;

/// 创建提交请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub submitted_by: i64,
    pub file_url: String,
}

impl From<CreateSubmissionRequest> for NewSubmission {
    fn from(req: CreateSubmissionRequest) -> Self {
        Self {
            assignment_id: req.assignment_id,
            submitted_by: req.submitted_by,
            file_url: req.file_url,
        }
    }
}
