use crate::domain::car::{Car, CarQuery, CreateCar};
use crate::domain::error::DomainError;
use crate::domain::non_empty;
use crate::domain::repository::CarRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct RentalService<R: CarRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CarRepository + ?Sized> RentalService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Every field is required. A numeric zero counts as missing, the same
    /// way an empty string does; negative numbers are stored as given.
    #[instrument(skip(self))]
    pub async fn create_car(&self, req: CreateCar) -> Result<Car> {
        let (
            Some(name),
            Some(price_per_day),
            Some(year),
            Some(color),
            Some(steering_type),
            Some(number_of_seats),
        ) = (
            non_empty(req.name),
            req.price_per_day.filter(|p| *p != 0.0),
            req.year.filter(|y| *y != 0),
            non_empty(req.color),
            non_empty(req.steering_type),
            req.number_of_seats.filter(|n| *n != 0),
        )
        else {
            warn!("Car rejected: missing required fields");
            return Err(DomainError::Validation("Missing required fields".to_string()).into());
        };

        let car = Car {
            id: Uuid::new_v4().to_string(),
            name,
            price_per_day,
            year,
            color,
            steering_type,
            number_of_seats,
        };
        self.repository.insert_car(car.clone()).await?;
        info!(car_id = %car.id, name = %car.name, "Car added");
        Ok(car)
    }

    #[instrument(skip(self))]
    pub async fn list_cars(&self, query: CarQuery) -> Result<Vec<Car>> {
        let filter = query.into_filter();
        debug!(filtered = !filter.is_empty(), "Listing rental cars");
        self.repository.find_cars(&filter).await
    }
}
