//! 上传文件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "uploads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub stored_name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub file_size: i64,
    #[sea_orm(column_type = "Text")]
    pub file_url: String,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_stored_upload(self) -> crate::models::uploads::entities::StoredUpload {
        use crate::models::uploads::entities::StoredUpload;
        use chrono::{DateTime, Utc};

        StoredUpload {
            id: self.id,
            stored_name: self.stored_name,
            file_name: self.file_name,
            content_type: self.content_type,
            file_size: self.file_size,
            file_url: self.file_url,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
