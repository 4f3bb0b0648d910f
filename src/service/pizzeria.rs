//! Restaurant, pizza and offering operations. Projections are built here; the store only returns rows.

use super::validation::{validate_price, CreateRestaurantPizza};
use crate::error::{AppError, ValidationError};
use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantDetail, RestaurantPizzaCreated};
use crate::store::PizzaStore;

pub struct PizzeriaService;

impl PizzeriaService {
    pub async fn list_restaurants(store: &dyn PizzaStore) -> Result<Vec<Restaurant>, AppError> {
        store.list_restaurants().await
    }

    /// Restaurant with every offering whose restaurant_id matches, each with its pizza.
    pub async fn get_restaurant(store: &dyn PizzaStore, id: i32) -> Result<RestaurantDetail, AppError> {
        let restaurant = store
            .get_restaurant(id)
            .await?
            .ok_or_else(AppError::restaurant_not_found)?;
        let offerings = store.restaurant_pizzas_for(id).await?;
        Ok(RestaurantDetail::new(restaurant, offerings))
    }

    pub async fn delete_restaurant(store: &dyn PizzaStore, id: i32) -> Result<(), AppError> {
        if !store.delete_restaurant(id).await? {
            return Err(AppError::restaurant_not_found());
        }
        tracing::info!(id, "restaurant deleted");
        Ok(())
    }

    pub async fn list_pizzas(store: &dyn PizzaStore) -> Result<Vec<Pizza>, AppError> {
        store.list_pizzas().await
    }

    /// Checks both references, then the price, then inserts. Nothing is written on failure.
    pub async fn create_restaurant_pizza(
        store: &dyn PizzaStore,
        req: CreateRestaurantPizza,
    ) -> Result<RestaurantPizzaCreated, AppError> {
        let pizza = store
            .get_pizza(req.pizza_id)
            .await?
            .ok_or(ValidationError::PizzaNotFound(req.pizza_id))?;
        let restaurant = store
            .get_restaurant(req.restaurant_id)
            .await?
            .ok_or(ValidationError::RestaurantNotFound(req.restaurant_id))?;
        let price = validate_price(req.price.as_ref())?;

        let row = store
            .insert_restaurant_pizza(&NewRestaurantPizza {
                price,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            })
            .await?;
        tracing::info!(id = row.id, restaurant_id = row.restaurant_id, pizza_id = row.pizza_id, price, "restaurant_pizza created");
        Ok(RestaurantPizzaCreated::new(row, pizza, restaurant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{seed_if_empty, MemoryStore};
    use serde_json::json;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        seed_if_empty(&store).await.unwrap();
        store
    }

    fn req(price: serde_json::Value, pizza_id: i32, restaurant_id: i32) -> CreateRestaurantPizza {
        CreateRestaurantPizza { price: Some(price), pizza_id, restaurant_id }
    }

    #[tokio::test]
    async fn create_returns_nested_rows() {
        let store = seeded().await;
        let created = PizzeriaService::create_restaurant_pizza(&store, req(json!(12), 1, 2))
            .await
            .unwrap();
        assert_eq!(created.price, 12);
        assert_eq!(created.pizza.id, 1);
        assert_eq!(created.restaurant.id, 2);
        assert_eq!(created.restaurant.name, "Sanjay's Pizza");
    }

    #[tokio::test]
    async fn missing_reference_is_checked_before_price() {
        let store = seeded().await;
        let err = PizzeriaService::create_restaurant_pizza(&store, req(json!(99), 77, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::PizzaNotFound(77))));
        let err = PizzeriaService::create_restaurant_pizza(&store, req(json!("abc"), 1, 77))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::RestaurantNotFound(77))));
        assert!(store.list_restaurant_pizzas().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_only_lists_own_offerings() {
        let store = seeded().await;
        PizzeriaService::create_restaurant_pizza(&store, req(json!(5), 1, 1)).await.unwrap();
        PizzeriaService::create_restaurant_pizza(&store, req(json!(6), 2, 1)).await.unwrap();
        PizzeriaService::create_restaurant_pizza(&store, req(json!(7), 3, 2)).await.unwrap();

        let detail = PizzeriaService::get_restaurant(&store, 1).await.unwrap();
        assert_eq!(detail.restaurant_pizzas.len(), 2);
        assert!(detail.restaurant_pizzas.iter().all(|rp| rp.restaurant_id == 1));
        assert_eq!(detail.restaurant_pizzas[1].pizza.name, "Geri");
    }

    #[tokio::test]
    async fn delete_unknown_restaurant_is_not_found() {
        let store = seeded().await;
        let err = PizzeriaService::delete_restaurant(&store, 404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Restaurant")));
    }
}
