use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 提交（业务实体）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    // 提交者 ID
    pub submitted_by: i64,
    // 提交内容的存储地址（通常是上传接口返回的 fileUrl）
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待写入的提交
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub assignment_id: i64,
    pub submitted_by: i64,
    pub file_url: String,
}
