use crate::services::ExportService;
use actix_web::{HttpResponse, http::header, web};

#[utoipa::path(
    get,
    path = "/export/users.csv",
    tag = "export",
    responses(
        (status = 200, description = "Streamed player/level/prize report", body = String, content_type = "text/csv")
    )
)]
/// Download the player/level/prize report. The body is generated row by
/// row; nothing is buffered beyond one page of the underlying join.
pub async fn export_users_csv(service: web::Data<ExportService>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"users.csv\"",
        ))
        .streaming(service.stream_users_csv())
}

pub fn export_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/export/users.csv", web::get().to(export_users_csv));
}
