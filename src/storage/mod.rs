use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    Cursor,
    submissions::entities::{NewSubmission, Submission},
    uploads::entities::{NewStoredUpload, StoredUpload},
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 提交管理方法
    // 创建提交
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 按作业分页查询提交，返回 (当前页, 总数)
    async fn find_submissions_by_assignment_id(
        &self,
        cursor: &Cursor,
        assignment_id: i64,
    ) -> Result<(Vec<Submission>, u64)>;

    /// 文件管理方法
    // 记录上传文件
    async fn create_upload(&self, upload: NewStoredUpload) -> Result<StoredUpload>;
    // 通过存储文件名获取文件信息
    async fn get_upload_by_stored_name(&self, stored_name: &str) -> Result<Option<StoredUpload>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
