use super::SubmissionService;
use crate::errors::{AutogradError, Result};
use crate::models::submissions::entities::{NewSubmission, Submission};
use crate::utils::validate::validate_file_url;

pub async fn create_submission(
    service: &SubmissionService,
    submission: NewSubmission,
) -> Result<Submission> {
    if let Err(e) = validate(&submission) {
        tracing::warn!(
            parent: service.logger(),
            submission = ?submission,
            error = %e,
            "提交参数校验失败"
        );
        return Err(e);
    }

    service.storage().create_submission(submission).await
}

fn validate(submission: &NewSubmission) -> Result<()> {
    if submission.assignment_id <= 0 {
        return Err(AutogradError::validation("assignmentId 必须为正整数"));
    }
    if submission.submitted_by <= 0 {
        return Err(AutogradError::validation("submittedBy 必须为正整数"));
    }
    validate_file_url(&submission.file_url).map_err(AutogradError::validation)
}
