use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::SubmissionService;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub submission_service: Arc<SubmissionService>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）与用例层实例
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    // 确保上传目录存在
    tokio::fs::create_dir_all(&config.upload.dir).await?;
    debug!("Upload directory ready: {}", config.upload.dir);

    let submission_service = Arc::new(
        SubmissionService::new(storage, config.upload.clone()).with_logger(
            tracing::info_span!("submission_service", system = %config.app.system_name),
        ),
    );

    Ok(StartupContext { submission_service })
}
