use crate::domain::user::{LoginRequest, Profile, RegisterUser};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[instrument(skip(state, req))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    info!(username = ?req.username, "Registration request received");

    let user = state
        .auth_service
        .register_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id: user.id,
    }))
}

#[instrument(skip(state, req))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(username = ?req.username, "Login request received");

    let token = state
        .auth_service
        .login(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to login");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// Echoes the identity from the token; the store is not consulted.
#[instrument(skip(user), fields(user_id = %user.0.user_id))]
pub async fn my_profile(user: AuthenticatedUser) -> HttpResponse {
    info!("Profile requested");
    HttpResponse::Ok().json(Profile::from(user.0))
}
