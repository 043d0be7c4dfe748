use crate::domain::car::{Car, CarFilter};
use crate::domain::repository::CarRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

/// In-process `cars` collection. Documents keep insertion order so that
/// equal prices come back in the order they were added.
#[derive(Clone)]
pub struct InMemoryCarRepository {
    storage: Arc<RwLock<Vec<Car>>>,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryCarRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    #[instrument(skip(self, car), fields(car_id = %car.id))]
    async fn insert_car(&self, car: Car) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.push(car);
        debug!(count = storage.len(), "Car saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_cars(&self, filter: &CarFilter) -> Result<Vec<Car>> {
        trace!("Acquiring read lock for car storage");
        let storage = self.storage.read().await;
        let mut cars: Vec<Car> = storage
            .iter()
            .filter(|car| filter.matches(car))
            .cloned()
            .collect();
        cars.sort_by(|a, b| a.price_per_day.total_cmp(&b.price_per_day));
        debug!(matched = cars.len(), total = storage.len(), "Cars queried");
        Ok(cars)
    }
}
