use actix_web::web;

use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

pub mod submissions;

pub mod uploads;

pub use submissions::configure_submissions_routes;
pub use uploads::configure_upload_routes;

// 设置请求参数绑定失败时的统一错误处理器
pub fn configure_parameter_handlers(cfg: &mut web::ServiceConfig, max_payload_size: usize) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}
