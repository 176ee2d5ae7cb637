use actix_web::{HttpResponse, Result as ActixResult, http::header, middleware, web};

use crate::models::uploads::entities::NewUpload;
use crate::models::uploads::requests::UploadRequest;
use crate::models::uploads::responses::UploadResponse;
use crate::services::SubmissionService;
use crate::utils::content_type_for;
use crate::utils::validate::file_extension;

pub async fn handle_upload(
    service: web::Data<SubmissionService>,
    body: web::Json<UploadRequest>,
) -> ActixResult<HttpResponse> {
    let upload = NewUpload::from(body.into_inner());

    match service.upload(upload).await {
        Ok(uploaded) => Ok(HttpResponse::Ok().json(UploadResponse::from(uploaded))),
        Err(e) => {
            tracing::error!(parent: service.logger(), error = %e, "上传文件失败");
            Err(e.into())
        }
    }
}

pub async fn handle_download(
    service: web::Data<SubmissionService>,
    stored_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let stored_name = stored_name.into_inner();

    match service.download(&stored_name).await {
        // 类型由扩展名决定，文件名使用数据库中的原始文件名
        Ok((upload, bytes)) => Ok(HttpResponse::Ok()
            .insert_header((
                header::CONTENT_TYPE,
                content_type_for(&file_extension(&upload.file_name)),
            ))
            .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", upload.file_name),
            ))
            .body(bytes)),
        Err(e) => {
            tracing::error!(
                parent: service.logger(),
                stored_name = %stored_name,
                error = %e,
                "下载文件失败"
            );
            Err(e.into())
        }
    }
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/uploads")
            .wrap(middleware::Compress::default())
            .route("", web::post().to(handle_upload))
            .route("/{stored_name}", web::get().to(handle_download)),
    );
}
