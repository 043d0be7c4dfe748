use crate::domain::car::{Car, CarFilter};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

/// The `cars` collection.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn insert_car(&self, car: Car) -> Result<()>;
    /// Cars matching `filter`, ascending by `price_per_day`.
    async fn find_cars(&self, filter: &CarFilter) -> Result<Vec<Car>>;
}

/// The `users` collection. `insert_user` must reject a document whose
/// `email` or `username` is already taken with `DomainError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<()>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>>;
}
