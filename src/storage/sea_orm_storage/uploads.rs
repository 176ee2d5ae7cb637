//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::uploads::{ActiveModel, Column, Entity as Uploads};
use crate::errors::{AutogradError, Result};
use crate::models::uploads::entities::{NewStoredUpload, StoredUpload};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 上传文件（创建文件记录）
    pub async fn create_upload_impl(&self, upload: NewStoredUpload) -> Result<StoredUpload> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            stored_name: Set(upload.stored_name.clone()),
            file_name: Set(upload.file_name.clone()),
            content_type: Set(upload.content_type.clone()),
            file_size: Set(upload.file_size),
            file_url: Set(upload.file_url.clone()),
            uploaded_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            tracing::error!(
                parent: &self.span,
                upload = ?upload,
                error = %e,
                "上传文件记录失败"
            );
            AutogradError::from(e)
        })?;

        Ok(result.into_stored_upload())
    }

    /// 通过存储文件名获取文件
    pub async fn get_upload_by_stored_name_impl(
        &self,
        stored_name: &str,
    ) -> Result<Option<StoredUpload>> {
        let result = Uploads::find()
            .filter(Column::StoredName.eq(stored_name))
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(parent: &self.span, stored_name, error = %e, "查询文件失败");
                AutogradError::from(e)
            })?;

        Ok(result.map(|m| m.into_stored_upload()))
    }
}
