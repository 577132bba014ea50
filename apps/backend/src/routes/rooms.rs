use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::entities::rooms::GameMode;
use crate::error::AppError;
use crate::services::rooms as rooms_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateRoomRequest {
    created_by: i64,
    game_mode: GameMode,
}

async fn create_room(
    app_state: web::Data<AppState>,
    body: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let room = rooms_service::create_room(&app_state.db, body.created_by, body.game_mode).await?;
    Ok(HttpResponse::Created().json(room))
}

async fn get_room_by_invite_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let room = rooms_service::find_by_invite_code(&app_state.db, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(room))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_room)));
    cfg.service(web::resource("/{invite_code}").route(web::get().to(get_room_by_invite_code)));
}
