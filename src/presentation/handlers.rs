use crate::application::auth_service::AuthService;
use crate::application::service::RentalService;
use crate::data::memory::InMemoryCarRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::car::{CarQuery, CreateCar};
use crate::domain::error::DomainError;
use crate::domain::repository::{CarRepository, UserRepository};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Shared, read-only request state. Repositories are injected here and nowhere
/// else.
pub struct AppState {
    pub rental_service: RentalService<dyn CarRepository>,
    pub auth_service: AuthService<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        cars: Arc<dyn CarRepository>,
        users: Arc<dyn UserRepository>,
        jwt_secret: String,
    ) -> Self {
        Self {
            rental_service: RentalService::new(cars),
            auth_service: AuthService::new(users, jwt_secret),
        }
    }

    pub fn in_memory(jwt_secret: String) -> Self {
        Self::new(
            Arc::new(InMemoryCarRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            jwt_secret,
        )
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::InvalidCredentials(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        let message = match self {
            ApiError::Validation(_) => {
                warn!(error = %error_msg, status = %status, "Validation error");
                error_msg
            }
            ApiError::Conflict(_) => {
                warn!(error = %error_msg, status = %status, "Conflict");
                error_msg
            }
            ApiError::InvalidCredentials(_) => {
                warn!(error = %error_msg, status = %status, "Invalid credentials");
                error_msg
            }
            ApiError::Unauthorized(_) => {
                warn!(error = %error_msg, status = %status, "Unauthorized");
                error_msg
            }
            ApiError::Database(_) => {
                error!(error = %error_msg, status = %status, "Database error");
                "Internal Server Error".to_string()
            }
            ApiError::Internal(_) => {
                error!(error = %error_msg, status = %status, "Internal error");
                "Internal Server Error".to_string()
            }
        };

        HttpResponse::build(status).json(ErrorResponse { message })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::Conflict(msg)) => ApiError::Conflict(msg.clone()),
            Some(DomainError::InvalidCredentials(msg)) => {
                ApiError::InvalidCredentials(msg.clone())
            }
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Database(format!("{:#}", err)),
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid JSON body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid query string: {}", err)).into()
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move {
            user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
        })
    }
}

// Handlers

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[derive(Serialize)]
pub struct CarCreatedResponse {
    pub message: String,
    #[serde(rename = "carId")]
    pub car_id: String,
}

#[instrument(skip(state, req), fields(car_id))]
pub async fn create_car(
    state: web::Data<AppState>,
    req: web::Json<CreateCar>,
) -> Result<HttpResponse, ApiError> {
    info!(name = ?req.name, "Adding rental car");
    let car = state
        .rental_service
        .create_car(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to add car");
            ApiError::from(e)
        })?;
    tracing::Span::current().record("car_id", car.id.as_str());

    Ok(HttpResponse::Created().json(CarCreatedResponse {
        message: "Car added successfully".to_string(),
        car_id: car.id,
    }))
}

#[instrument(skip(state))]
pub async fn list_rental_cars(
    state: web::Data<AppState>,
    query: web::Query<CarQuery>,
) -> Result<HttpResponse, ApiError> {
    let cars = state
        .rental_service
        .list_cars(query.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list cars");
            ApiError::from(e)
        })?;
    info!(count = cars.len(), "Rental cars listed");
    Ok(HttpResponse::Ok().json(cars))
}
