use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    /// Omitted or blank: a guest identity with a generated name is created.
    name: Option<String>,
}

async fn create_user(
    app_state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = users_service::create_user(&app_state.db, body.into_inner().name).await?;
    Ok(HttpResponse::Created().json(user))
}

async fn get_user(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = users_service::find_user(&app_state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_user)));
    cfg.service(web::resource("/{user_id}").route(web::get().to(get_user)));
}
