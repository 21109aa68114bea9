use crate::models::*;
use crate::services::ProgressService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/levels",
    tag = "progress",
    responses(
        (status = 200, description = "Level catalog ordered by position", body = [LevelResponse])
    )
)]
pub async fn list_levels(service: web::Data<ProgressService>) -> Result<HttpResponse> {
    match service.list_levels().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/levels",
    tag = "progress",
    request_body = CreateLevelRequest,
    responses(
        (status = 200, description = "Level created", body = LevelResponse),
        (status = 400, description = "Invalid level definition")
    )
)]
pub async fn create_level(
    service: web::Data<ProgressService>,
    request: web::Json<CreateLevelRequest>,
) -> Result<HttpResponse> {
    match service.create_level(request.into_inner()).await {
        Ok(level) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": level }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/levels/{id}/prizes",
    tag = "progress",
    params(
        ("id" = i64, Path, description = "Level id")
    ),
    request_body = AttachPrizeRequest,
    responses(
        (status = 200, description = "Prize attached to the level's pool", body = PrizeResponse),
        (status = 400, description = "Invalid prize title"),
        (status = 404, description = "Level not found")
    )
)]
pub async fn attach_prize(
    service: web::Data<ProgressService>,
    path: web::Path<i64>,
    request: web::Json<AttachPrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .attach_prize(path.into_inner(), request.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/players/{id}/levels/{level_id}/start",
    tag = "progress",
    params(
        ("id" = i64, Path, description = "Player id"),
        ("level_id" = i64, Path, description = "Level id")
    ),
    responses(
        (status = 200, description = "Progress record created", body = PlayerLevelResponse),
        (status = 400, description = "Level already started"),
        (status = 404, description = "Player or level not found")
    )
)]
pub async fn start_level(
    service: web::Data<ProgressService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (player_id, level_id) = path.into_inner();
    match service.start_level(player_id, level_id).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": progress }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/player-levels/{id}/complete",
    tag = "progress",
    params(
        ("id" = i64, Path, description = "Level progress id")
    ),
    request_body = CompleteLevelRequest,
    responses(
        (status = 200, description = "Level marked completed", body = PlayerLevelResponse),
        (status = 400, description = "Already completed or invalid score"),
        (status = 404, description = "Progress record not found")
    )
)]
pub async fn complete_level(
    service: web::Data<ProgressService>,
    path: web::Path<i64>,
    request: web::Json<CompleteLevelRequest>,
) -> Result<HttpResponse> {
    match service
        .complete_level(path.into_inner(), request.into_inner())
        .await
    {
        Ok(progress) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": progress }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/player-levels/{id}/award",
    tag = "progress",
    params(
        ("id" = i64, Path, description = "Level progress id")
    ),
    responses(
        (status = 200, description = "Draw outcome; prize is null when nothing was awarded", body = AwardPrizeResponse),
        (status = 404, description = "Progress record not found")
    )
)]
/// Run the random prize draw for a completed level
pub async fn award_prize(
    service: web::Data<ProgressService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.award_prize(path.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "data": AwardPrizeResponse { prize } }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn progress_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/levels", web::get().to(list_levels))
        .route("/levels", web::post().to(create_level))
        .route("/levels/{id}/prizes", web::post().to(attach_prize))
        .route(
            "/players/{id}/levels/{level_id}/start",
            web::post().to(start_level),
        )
        .route("/player-levels/{id}/complete", web::post().to(complete_level))
        .route("/player-levels/{id}/award", web::post().to(award_prize));
}
