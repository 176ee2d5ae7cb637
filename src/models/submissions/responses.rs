use serde::Serialize;

use super::entities::Submission;

/// 提交响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub submitted_by: i64,
    pub file_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            submitted_by: submission.submitted_by,
            file_url: submission.file_url,
            created_at: submission.created_at.to_rfc3339(),
            updated_at: submission.updated_at.to_rfc3339(),
        }
    }
}

/// 批量转换提交列表
pub fn new_submission_responses(submissions: Vec<Submission>) -> Vec<SubmissionResponse> {
    submissions.into_iter().map(SubmissionResponse::from).collect()
}
