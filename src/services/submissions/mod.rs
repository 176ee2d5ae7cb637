//! 提交用例层
//!
//! 位于 HTTP 处理层与存储层之间，负责校验业务规则并调用 [`Storage`]。

pub mod create;
pub mod download;
pub mod list;
pub mod upload;

use std::sync::Arc;
use tracing::Span;

use crate::config::UploadConfig;
use crate::errors::Result;
use crate::models::Cursor;
use crate::models::submissions::entities::{NewSubmission, Submission};
use crate::models::uploads::entities::{NewUpload, StoredUpload, Upload};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    upload_config: UploadConfig,
    span: Span,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, upload_config: UploadConfig) -> Self {
        Self {
            storage,
            upload_config,
            span: tracing::info_span!("submission_service"),
        }
    }

    /// 替换日志上下文
    pub fn with_logger(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn upload_config(&self) -> &UploadConfig {
        &self.upload_config
    }

    pub(crate) fn logger(&self) -> &Span {
        &self.span
    }

    /// 创建提交
    pub async fn create(&self, submission: NewSubmission) -> Result<Submission> {
        create::create_submission(self, submission).await
    }

    /// 上传文件
    pub async fn upload(&self, upload: NewUpload) -> Result<Upload> {
        upload::upload_file(self, upload).await
    }

    /// 按作业分页列出提交
    pub async fn find_all_by_assignment_id(
        &self,
        cursor: &Cursor,
        assignment_id: i64,
    ) -> Result<(Vec<Submission>, u64)> {
        list::find_all_by_assignment_id(self, cursor, assignment_id).await
    }

    /// 读取已上传的文件
    pub async fn download(&self, stored_name: &str) -> Result<(StoredUpload, Vec<u8>)> {
        download::download_file(self, stored_name).await
    }
}
