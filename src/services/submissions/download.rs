use std::io::ErrorKind;
use std::path::Path;

use super::SubmissionService;
use crate::errors::{AutogradError, Result};
use crate::models::uploads::entities::StoredUpload;
use crate::utils::validate::is_stored_name;

pub async fn download_file(
    service: &SubmissionService,
    stored_name: &str,
) -> Result<(StoredUpload, Vec<u8>)> {
    // 只接受服务端生成的文件名，杜绝路径穿越
    if !is_stored_name(stored_name) {
        return Err(AutogradError::not_found("文件不存在"));
    }

    let upload = service
        .storage()
        .get_upload_by_stored_name(stored_name)
        .await?
        .ok_or_else(|| AutogradError::not_found("文件不存在"))?;

    let file_path = Path::new(&service.upload_config().dir).join(&upload.stored_name);
    match tokio::fs::read(&file_path).await {
        Ok(bytes) => Ok((upload, bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::error!(
                parent: service.logger(),
                path = %file_path.display(),
                "文件记录存在但文件已丢失"
            );
            Err(AutogradError::not_found("文件不存在"))
        }
        Err(e) => {
            tracing::error!(parent: service.logger(), path = %file_path.display(), error = %e, "读取文件失败");
            Err(AutogradError::from(e))
        }
    }
}
