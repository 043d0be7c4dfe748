use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use car_rental_api::infrastructure::config::{AppConfig, StoreBackend};
use car_rental_api::infrastructure::logging::init_logging;
use car_rental_api::presentation::handlers::AppState;
use car_rental_api::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use car_rental_api::presentation::routes::{self, ROUTES};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = ?e, "Invalid configuration");
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                e.to_string(),
            ));
        }
    };

    let state = match config.store_backend() {
        Ok(StoreBackend::InMemory) => {
            info!(database_url = %config.database_url, "Using in-memory document store");
            web::Data::new(AppState::in_memory(config.jwt_secret.clone()))
        }
        Err(e) => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                e.to_string(),
            ));
        }
    };

    let jwt_secret = config.jwt_secret.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(|cfg| routes::configure(cfg, &jwt_secret))
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    let server = server.bind((config.host.as_str(), config.port))?;
    info!(address = %bind_addr, routes = %ROUTES, "Starting HTTP server");
    server.run().await
}
