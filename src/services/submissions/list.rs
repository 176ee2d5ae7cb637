use super::SubmissionService;
use crate::errors::{AutogradError, Result};
use crate::models::Cursor;
use crate::models::submissions::entities::Submission;

pub async fn find_all_by_assignment_id(
    service: &SubmissionService,
    cursor: &Cursor,
    assignment_id: i64,
) -> Result<(Vec<Submission>, u64)> {
    if assignment_id <= 0 {
        tracing::warn!(parent: service.logger(), assignment_id, "作业 ID 非法");
        return Err(AutogradError::validation("assignmentId 必须为正整数"));
    }

    service
        .storage()
        .find_submissions_by_assignment_id(cursor, assignment_id)
        .await
}
