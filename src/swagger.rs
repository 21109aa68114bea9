use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::player::register,
        handlers::player::get_player,
        handlers::player::daily_login,
        handlers::boost::list_boosts,
        handlers::boost::create_boost,
        handlers::boost::grant_boost,
        handlers::boost::apply_boost,
        handlers::progress::list_levels,
        handlers::progress::create_level,
        handlers::progress::attach_prize,
        handlers::progress::start_level,
        handlers::progress::complete_level,
        handlers::progress::award_prize,
        handlers::export::export_users_csv,
    ),
    components(
        schemas(
            RegisterPlayerRequest,
            PlayerResponse,
            DailyLoginResponse,
            CreateBoostRequest,
            BoostResponse,
            GrantBoostRequest,
            PlayerBoostResponse,
            ApplyBoostResponse,
            CreateLevelRequest,
            LevelResponse,
            AttachPrizeRequest,
            PrizeResponse,
            PlayerLevelResponse,
            CompleteLevelRequest,
            AwardPrizeResponse,
        )
    ),
    tags(
        (name = "player", description = "Player registration and daily-login bonus"),
        (name = "boost", description = "Boost catalog, grants and application"),
        (name = "progress", description = "Levels, completion and prize awards"),
        (name = "export", description = "CSV reporting"),
    ),
    info(
        title = "Gamify Backend API",
        version = "1.0.0",
        description = "Player points, boosts, level progress and prize awards"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
