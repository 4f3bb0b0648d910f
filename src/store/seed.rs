//! Sample restaurants and pizzas for fresh databases.

use super::PizzaStore;
use crate::error::AppError;
use crate::models::{NewPizza, NewRestaurant};

pub fn sample_restaurants() -> Vec<NewRestaurant> {
    [
        ("Karen's Pizza Shack", "address1"),
        ("Sanjay's Pizza", "address2"),
        ("Kiki's Pizza", "address3"),
    ]
    .into_iter()
    .map(|(name, address)| NewRestaurant {
        name: name.into(),
        address: address.into(),
    })
    .collect()
}

pub fn sample_pizzas() -> Vec<NewPizza> {
    [
        ("Emma", "Dough, Tomato Sauce, Cheese"),
        ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
        ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
    ]
    .into_iter()
    .map(|(name, ingredients)| NewPizza {
        name: name.into(),
        ingredients: ingredients.into(),
    })
    .collect()
}

/// Insert the sample rows into each table that is still empty. Returns (restaurants, pizzas) inserted.
pub async fn seed_if_empty(store: &dyn PizzaStore) -> Result<(usize, usize), AppError> {
    let mut restaurants = 0;
    if store.list_restaurants().await?.is_empty() {
        for r in sample_restaurants() {
            store.insert_restaurant(&r).await?;
            restaurants += 1;
        }
    }
    let mut pizzas = 0;
    if store.list_pizzas().await?.is_empty() {
        for p in sample_pizzas() {
            store.insert_pizza(&p).await?;
            pizzas += 1;
        }
    }
    tracing::info!(restaurants, pizzas, "seeded");
    Ok((restaurants, pizzas))
}
