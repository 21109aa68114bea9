use crate::models::*;
use crate::services::PlayerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/players",
    tag = "player",
    request_body = RegisterPlayerRequest,
    responses(
        (status = 200, description = "Player registered", body = PlayerResponse),
        (status = 400, description = "Invalid or duplicate player_id")
    )
)]
pub async fn register(
    service: web::Data<PlayerService>,
    request: web::Json<RegisterPlayerRequest>,
) -> Result<HttpResponse> {
    match service.register(request.into_inner()).await {
        Ok(player) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": player }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/players/{id}",
    tag = "player",
    params(
        ("id" = i64, Path, description = "Player id")
    ),
    responses(
        (status = 200, description = "Player profile", body = PlayerResponse),
        (status = 404, description = "Player not found")
    )
)]
pub async fn get_player(
    service: web::Data<PlayerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_player(path.into_inner()).await {
        Ok(player) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": player }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/players/{id}/daily-login",
    tag = "player",
    params(
        ("id" = i64, Path, description = "Player id")
    ),
    responses(
        (status = 200, description = "Bonus credited", body = DailyLoginResponse),
        (status = 400, description = "Bonus already claimed today"),
        (status = 404, description = "Player not found")
    )
)]
/// Claim the once-per-date login bonus
pub async fn daily_login(
    service: web::Data<PlayerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.daily_login(path.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn player_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/players", web::post().to(register))
        .route("/players/{id}", web::get().to(get_player))
        .route("/players/{id}/daily-login", web::post().to(daily_login));
}
