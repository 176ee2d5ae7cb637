use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use uuid::Uuid;

use super::SubmissionService;
use crate::errors::{AutogradError, Result};
use crate::models::uploads::entities::{NewStoredUpload, NewUpload, Upload};
use crate::utils::validate::{file_extension, validate_content_type, validate_file_name};
use crate::utils::validate_magic_bytes;

pub async fn upload_file(service: &SubmissionService, upload: NewUpload) -> Result<Upload> {
    let config = service.upload_config();

    let bytes = match decode_and_check(&upload, &config.allowed_types, config.max_size) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                parent: service.logger(),
                file_name = %upload.file_name,
                content_type = ?upload.content_type,
                error = %e,
                "上传文件校验失败"
            );
            return Err(e);
        }
    };

    // 确保上传目录存在
    if let Err(e) = tokio::fs::create_dir_all(&config.dir).await {
        tracing::error!(parent: service.logger(), dir = %config.dir, error = %e, "创建上传目录失败");
        return Err(AutogradError::file_operation(format!("创建上传目录失败: {e}")));
    }

    let stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
    let file_path = Path::new(&config.dir).join(&stored_name);

    if let Err(e) = tokio::fs::write(&file_path, &bytes).await {
        tracing::error!(
            parent: service.logger(),
            path = %file_path.display(),
            error = %e,
            "写入上传文件失败"
        );
        return Err(AutogradError::file_operation(format!("文件写入失败: {e}")));
    }

    let record = NewStoredUpload {
        file_url: format!("{}/{}", config.public_path.trim_end_matches('/'), stored_name),
        stored_name,
        file_name: upload.file_name.clone(),
        content_type: upload.content_type.clone(),
        file_size: bytes.len() as i64,
    };

    match service.storage().create_upload(record).await {
        Ok(stored) => Ok(Upload::from_parts(upload, stored)),
        Err(e) => {
            // 元数据写入失败时回收已落盘的文件
            if let Err(remove_err) = tokio::fs::remove_file(&file_path).await {
                tracing::warn!(
                    parent: service.logger(),
                    path = %file_path.display(),
                    error = %remove_err,
                    "回收上传文件失败"
                );
            }
            Err(e)
        }
    }
}

/// 校验文件名、类型与大小，返回解码后的文件内容
fn decode_and_check(upload: &NewUpload, allowed_types: &[String], max_size: usize) -> Result<Vec<u8>> {
    validate_file_name(&upload.file_name).map_err(AutogradError::validation)?;
    if let Some(content_type) = &upload.content_type {
        validate_content_type(content_type).map_err(AutogradError::validation)?;
    }

    let extension = file_extension(&upload.file_name);
    if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
        return Err(AutogradError::unsupported_file_type(format!(
            "不支持的文件类型: '{extension}'"
        )));
    }

    // 解码前按 base64 长度粗略估算，避免为超大请求分配内存
    if upload.content.len() / 4 * 3 > max_size + 3 {
        return Err(AutogradError::payload_too_large(format!(
            "文件大小超过限制 ({max_size} 字节)"
        )));
    }

    let bytes = STANDARD.decode(upload.content.trim())?;
    if bytes.is_empty() {
        return Err(AutogradError::validation("文件内容不能为空"));
    }
    if bytes.len() > max_size {
        return Err(AutogradError::payload_too_large(format!(
            "文件大小超过限制 ({max_size} 字节)"
        )));
    }

    if !validate_magic_bytes(&bytes, &extension) {
        return Err(AutogradError::unsupported_file_type(
            "文件内容与扩展名不匹配",
        ));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::Cursor;
    use crate::models::submissions::entities::{NewSubmission, Submission};
    use crate::models::uploads::entities::StoredUpload;
    use crate::services::submissions::test_support::{service_with, temp_upload_config};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    fn new_upload(file_name: &str, body: &[u8]) -> NewUpload {
        NewUpload {
            file_name: file_name.to_string(),
            content_type: Some("text/plain".to_string()),
            content: STANDARD.encode(body),
        }
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_echoes_request() {
        let service = service_with(memory_storage().await);
        let request = new_upload("main.cpp", b"int main() {}\n");

        let upload = service.upload(request.clone()).await.unwrap();
        assert!(upload.id > 0);
        assert_eq!(upload.file_name, request.file_name);
        assert_eq!(upload.content_type, request.content_type);
        assert_eq!(upload.content, request.content);
        assert_eq!(upload.size, 14);
        assert!(upload.file_url.starts_with("/api/v1/uploads/"));
        assert!(!upload.file_url.contains("//"));

        let stored_name = upload.file_url.rsplit('/').next().unwrap();
        let on_disk = std::fs::read(Path::new(&service.upload_config().dir).join(stored_name))
            .unwrap();
        assert_eq!(on_disk, b"int main() {}\n");
    }

    #[tokio::test]
    async fn test_rejects_disallowed_extension() {
        let service = service_with(memory_storage().await);
        let err = service
            .upload(new_upload("payload.exe", b"MZ"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[tokio::test]
    async fn test_rejects_oversized_file() {
        let service = service_with(memory_storage().await);
        let err = service
            .upload(new_upload("big.py", &[b'a'; 65]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_rejects_bad_base64_and_empty_body() {
        let service = service_with(memory_storage().await);

        let mut request = new_upload("main.py", b"x");
        request.content = "***not base64***".to_string();
        assert_eq!(service.upload(request).await.unwrap_err().code(), "E002");

        let err = service.upload(new_upload("main.py", b"")).await.unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[tokio::test]
    async fn test_rejects_malformed_content_type() {
        let service = service_with(memory_storage().await);
        let mut request = new_upload("main.py", b"print(1)\n");
        request.content_type = Some("text/html\r\nSet-Cookie: a=b".to_string());
        assert_eq!(service.upload(request).await.unwrap_err().code(), "E002");
    }

    /// 元数据写入总是失败的存储
    struct RejectingStorage;

    #[async_trait::async_trait]
    impl Storage for RejectingStorage {
        async fn create_submission(&self, _: NewSubmission) -> Result<Submission> {
            Err(AutogradError::database_operation("unavailable"))
        }

        async fn find_submissions_by_assignment_id(
            &self,
            _: &Cursor,
            _: i64,
        ) -> Result<(Vec<Submission>, u64)> {
            Err(AutogradError::database_operation("unavailable"))
        }

        async fn create_upload(&self, _: NewStoredUpload) -> Result<StoredUpload> {
            Err(AutogradError::database_operation("unavailable"))
        }

        async fn get_upload_by_stored_name(&self, _: &str) -> Result<Option<StoredUpload>> {
            Err(AutogradError::database_operation("unavailable"))
        }
    }

    #[tokio::test]
    async fn test_failed_record_removes_written_file() {
        let service = SubmissionService::new(Arc::new(RejectingStorage), temp_upload_config());

        let err = service
            .upload(new_upload("main.py", b"x = 1\n"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        let leftover = std::fs::read_dir(&service.upload_config().dir)
            .unwrap()
            .count();
        assert_eq!(leftover, 0);
    }

    #[tokio::test]
    async fn test_rejects_content_mismatch() {
        let service = service_with(memory_storage().await);
        let err = service
            .upload(new_upload("solution.zip", b"plain text, not a zip"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E011");
    }
}
