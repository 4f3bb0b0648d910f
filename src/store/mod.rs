//! Storage seam: the three tables behind one trait, with a PostgreSQL and an in-memory engine.

mod memory;
mod postgres;
mod seed;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};
pub use seed::{seed_if_empty, sample_pizzas, sample_restaurants};

use crate::error::AppError;
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
    RestaurantPizzaWithPizza,
};
use async_trait::async_trait;

/// Row-level access to restaurants, pizzas and restaurant_pizzas.
/// List methods return rows in primary-key order.
#[async_trait]
pub trait PizzaStore: Send + Sync {
    /// Cheap round trip used by `GET /ready`.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError>;
    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, AppError>;
    async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, AppError>;
    /// Deletes the restaurant's restaurant_pizzas and then the restaurant as one unit.
    /// Returns false when no restaurant has that id.
    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError>;

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError>;
    async fn get_pizza(&self, id: i32) -> Result<Option<Pizza>, AppError>;
    async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, AppError>;

    async fn list_restaurant_pizzas(&self) -> Result<Vec<RestaurantPizza>, AppError>;
    /// Offerings of one restaurant joined with their pizza.
    async fn restaurant_pizzas_for(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPizzaWithPizza>, AppError>;
    /// Fails with a validation error when either referenced row is gone at insert time.
    async fn insert_restaurant_pizza(
        &self,
        new: &NewRestaurantPizza,
    ) -> Result<RestaurantPizza, AppError>;

    /// Release connections. Called once on shutdown.
    async fn close(&self) {}
}
