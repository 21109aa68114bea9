use crate::models::*;
use crate::services::BoostService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/boosts",
    tag = "boost",
    responses(
        (status = 200, description = "Boost catalog", body = [BoostResponse])
    )
)]
pub async fn list_boosts(service: web::Data<BoostService>) -> Result<HttpResponse> {
    match service.list_boosts().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/boosts",
    tag = "boost",
    request_body = CreateBoostRequest,
    responses(
        (status = 200, description = "Boost created", body = BoostResponse),
        (status = 400, description = "Invalid boost definition")
    )
)]
pub async fn create_boost(
    service: web::Data<BoostService>,
    request: web::Json<CreateBoostRequest>,
) -> Result<HttpResponse> {
    match service.create_boost(request.into_inner()).await {
        Ok(boost) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": boost }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/players/{id}/boosts",
    tag = "boost",
    params(
        ("id" = i64, Path, description = "Player id")
    ),
    request_body = GrantBoostRequest,
    responses(
        (status = 200, description = "Boost granted", body = PlayerBoostResponse),
        (status = 404, description = "Player or boost not found")
    )
)]
pub async fn grant_boost(
    service: web::Data<BoostService>,
    path: web::Path<i64>,
    request: web::Json<GrantBoostRequest>,
) -> Result<HttpResponse> {
    match service
        .grant_boost(path.into_inner(), request.into_inner())
        .await
    {
        Ok(grant) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": grant }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/player-boosts/{id}/apply",
    tag = "boost",
    params(
        ("id" = i64, Path, description = "Boost grant id")
    ),
    responses(
        (status = 200, description = "Effect credited", body = ApplyBoostResponse),
        (status = 400, description = "Boost inactive for this player"),
        (status = 404, description = "Grant not found")
    )
)]
/// Apply a granted boost: credits the effect and spends the grant in one
/// transaction
pub async fn apply_boost(
    service: web::Data<BoostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.apply_boost(path.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn boost_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/boosts", web::get().to(list_boosts))
        .route("/boosts", web::post().to(create_boost))
        .route("/players/{id}/boosts", web::post().to(grant_boost))
        .route("/player-boosts/{id}/apply", web::post().to(apply_boost));
}
