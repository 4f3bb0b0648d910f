//! Rows of the three tables and the JSON projections returned by the API.

use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// Insert payload for a restaurant_pizzas row. Only built from a validated request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewRestaurantPizza {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// Insert payloads for seeding; ids are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

/// One offering nested under a restaurant: the association plus its pizza.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantPizzaWithPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
    pub pizza: Pizza,
}

impl RestaurantPizzaWithPizza {
    pub fn new(rp: RestaurantPizza, pizza: Pizza) -> Self {
        Self {
            id: rp.id,
            price: rp.price,
            restaurant_id: rp.restaurant_id,
            pizza_id: rp.pizza_id,
            pizza,
        }
    }
}

/// GET /restaurants/:id body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaWithPizza>,
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, restaurant_pizzas: Vec<RestaurantPizzaWithPizza>) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas,
        }
    }
}

/// POST /restaurant_pizzas body: the new row with both referenced entities embedded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantPizzaCreated {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

impl RestaurantPizzaCreated {
    pub fn new(rp: RestaurantPizza, pizza: Pizza, restaurant: Restaurant) -> Self {
        Self {
            id: rp.id,
            price: rp.price,
            pizza_id: rp.pizza_id,
            restaurant_id: rp.restaurant_id,
            pizza,
            restaurant,
        }
    }
}
