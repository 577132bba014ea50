use actix_web::web;

pub mod health;
pub mod realtime;
pub mod rooms;
pub mod users;

/// Configure application routes for the server and for test harnesses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // User routes: /api/users/**
    cfg.service(web::scope("/api/users").configure(users::configure_routes));

    // Room routes: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Realtime routes: /api/ws
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));
}
