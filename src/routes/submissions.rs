use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::submissions::entities::NewSubmission;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::submissions::responses::{SubmissionResponse, new_submission_responses};
use crate::models::{Cursor, CursorQuery, CursorResponse};
use crate::services::SubmissionService;

// 创建提交
pub async fn create_submission(
    service: web::Data<SubmissionService>,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let submission = NewSubmission::from(body.into_inner());

    match service.create(submission).await {
        Ok(created) => Ok(HttpResponse::Ok().json(SubmissionResponse::from(created))),
        Err(e) => {
            tracing::error!(parent: service.logger(), error = %e, "创建提交失败");
            Err(e.into())
        }
    }
}

// 按作业分页列出提交
pub async fn list_assignment_submissions(
    service: web::Data<SubmissionService>,
    path: web::Path<i64>, // assignment_id
    query: web::Query<CursorQuery>,
) -> ActixResult<HttpResponse> {
    let assignment_id = path.into_inner();
    let cursor = Cursor::from(query.into_inner());

    match service
        .find_all_by_assignment_id(&cursor, assignment_id)
        .await
    {
        Ok((submissions, count)) => Ok(HttpResponse::Ok().json(CursorResponse::new(
            &cursor,
            new_submission_responses(submissions),
            count,
        ))),
        Err(e) => {
            tracing::error!(
                parent: service.logger(),
                assignment_id,
                cursor = ?cursor,
                error = %e,
                "查询作业提交列表失败"
            );
            Err(e.into())
        }
    }
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions").route("", web::post().to(create_submission)),
    );

    // 作业相关的提交路由
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/submissions")
            .route("", web::get().to(list_assignment_submissions)),
    );
}
