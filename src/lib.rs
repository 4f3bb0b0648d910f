//! Pizzeria API: restaurants, pizzas and priced restaurant_pizzas offerings over JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, StoreBackend};
pub use error::{AppError, ConfigError, ValidationError};
pub use routes::{api_routes, app, common_routes};
pub use service::PizzeriaService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, seed_if_empty, MemoryStore, PgStore, PizzaStore};
