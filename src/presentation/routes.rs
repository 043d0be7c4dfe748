use crate::presentation::auth::{login, my_profile, register};
use crate::presentation::handlers::{
    create_car, health_check, json_error_handler, list_rental_cars, query_error_handler,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use actix_web::web;

pub const ROUTES: &str = "GET /health, POST /cars, GET /rental-cars, POST /register, POST /login, GET /my-profile";

/// Registers every endpoint. Only `/my-profile` sits behind the token check.
pub fn configure(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("/health", web::get().to(health_check))
        .route("/cars", web::post().to(create_car))
        .route("/rental-cars", web::get().to(list_rental_cars))
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::resource("/my-profile")
                .wrap(JwtAuthMiddleware::new(jwt_secret))
                .route(web::get().to(my_profile)),
        );
}
