use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::non_empty;
use crate::domain::user::{Identity, LoginRequest, RegisterUser, User};
use crate::infrastructure::security::{generate_token, hash_password, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

pub struct AuthService<R: UserRepository + ?Sized> {
    user_repository: Arc<R>,
    jwt_secret: String,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    #[instrument(skip(self, req), fields(username = ?req.username))]
    pub async fn register_user(&self, req: RegisterUser) -> Result<User> {
        trace!("Starting user registration");

        let (Some(full_name), Some(email), Some(username), Some(password)) = (
            non_empty(req.full_name),
            non_empty(req.email),
            non_empty(req.username),
            non_empty(req.password),
        ) else {
            warn!("Registration rejected: missing fields");
            return Err(DomainError::Validation("All fields are required".to_string()).into());
        };

        if self
            .user_repository
            .find_user_by_email_or_username(&email, &username)
            .await?
            .is_some()
        {
            warn!(email = %email, username = %username, "User already exists");
            return Err(
                DomainError::Conflict("Email or username already in use".to_string()).into(),
            );
        }

        let password_hash = hash_password(&password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name,
            email,
            username,
            password_hash,
        };

        debug!(user_id = %user.id, "Saving user to repository");
        // The store re-checks uniqueness atomically; a racing duplicate fails here.
        self.user_repository.insert_user(user.clone()).await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            "User registered successfully"
        );

        Ok(user)
    }

    #[instrument(skip(self, req), fields(username = ?req.username))]
    pub async fn login(&self, req: LoginRequest) -> Result<String> {
        trace!("Starting login");

        let (Some(username), Some(password)) = (non_empty(req.username), non_empty(req.password))
        else {
            warn!("Login rejected: missing credentials");
            return Err(
                DomainError::Validation("Username and password are required".to_string()).into(),
            );
        };

        let user = self
            .user_repository
            .find_user_by_username(&username)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "User not found during login");
                DomainError::InvalidCredentials("Invalid username".to_string())
            })?;

        let is_valid = verify_password(&password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials("Invalid password".to_string()).into());
        }

        let token = generate_token(&Identity::from(&user), &self.jwt_secret).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;

        info!(user_id = %user.id, username = %user.username, "Login successful");

        Ok(token)
    }
}
