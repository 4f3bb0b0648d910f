//! PizzeriaService: the five API operations over a PizzaStore.

mod pizzeria;
mod validation;
pub use pizzeria::PizzeriaService;
pub use validation::{validate_price, CreateRestaurantPizza, PRICE_MAX, PRICE_MIN};
