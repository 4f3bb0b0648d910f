//! In-process engine. Same contract as the PostgreSQL store, one mutex over all three tables.

use super::PizzaStore;
use crate::error::{AppError, ValidationError};
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
    RestaurantPizzaWithPizza,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    restaurants: BTreeMap<i32, Restaurant>,
    pizzas: BTreeMap<i32, Pizza>,
    restaurant_pizzas: BTreeMap<i32, RestaurantPizza>,
    // Serial sequences: ids are never reused, like SERIAL columns.
    next_restaurant_id: i32,
    next_pizza_id: i32,
    next_restaurant_pizza_id: i32,
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl PizzaStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        Ok(self.lock()?.restaurants.values().cloned().collect())
    }

    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, AppError> {
        Ok(self.lock()?.restaurants.get(&id).cloned())
    }

    async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, AppError> {
        let mut t = self.lock()?;
        let id = next_id(&mut t.next_restaurant_id);
        let row = Restaurant {
            id,
            name: new.name.clone(),
            address: new.address.clone(),
        };
        t.restaurants.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.lock()?;
        if !t.restaurants.contains_key(&id) {
            return Ok(false);
        }
        t.restaurant_pizzas.retain(|_, rp| rp.restaurant_id != id);
        t.restaurants.remove(&id);
        Ok(true)
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        Ok(self.lock()?.pizzas.values().cloned().collect())
    }

    async fn get_pizza(&self, id: i32) -> Result<Option<Pizza>, AppError> {
        Ok(self.lock()?.pizzas.get(&id).cloned())
    }

    async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, AppError> {
        let mut t = self.lock()?;
        let id = next_id(&mut t.next_pizza_id);
        let row = Pizza {
            id,
            name: new.name.clone(),
            ingredients: new.ingredients.clone(),
        };
        t.pizzas.insert(id, row.clone());
        Ok(row)
    }

    async fn list_restaurant_pizzas(&self) -> Result<Vec<RestaurantPizza>, AppError> {
        Ok(self.lock()?.restaurant_pizzas.values().cloned().collect())
    }

    async fn restaurant_pizzas_for(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPizzaWithPizza>, AppError> {
        let t = self.lock()?;
        let rows = t
            .restaurant_pizzas
            .values()
            .filter(|rp| rp.restaurant_id == restaurant_id)
            .filter_map(|rp| {
                t.pizzas
                    .get(&rp.pizza_id)
                    .map(|p| RestaurantPizzaWithPizza::new(rp.clone(), p.clone()))
            })
            .collect();
        Ok(rows)
    }

    async fn insert_restaurant_pizza(
        &self,
        new: &NewRestaurantPizza,
    ) -> Result<RestaurantPizza, AppError> {
        let mut t = self.lock()?;
        if !t.pizzas.contains_key(&new.pizza_id) {
            return Err(ValidationError::PizzaNotFound(new.pizza_id).into());
        }
        if !t.restaurants.contains_key(&new.restaurant_id) {
            return Err(ValidationError::RestaurantNotFound(new.restaurant_id).into());
        }
        let id = next_id(&mut t.next_restaurant_pizza_id);
        let row = RestaurantPizza {
            id,
            price: new.price,
            restaurant_id: new.restaurant_id,
            pizza_id: new.pizza_id,
        };
        t.restaurant_pizzas.insert(id, row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_offering() -> (MemoryStore, Restaurant, Pizza) {
        let store = MemoryStore::new();
        let r = store
            .insert_restaurant(&NewRestaurant { name: "A".into(), address: "1 St".into() })
            .await
            .unwrap();
        let p = store
            .insert_pizza(&NewPizza { name: "P".into(), ingredients: "x".into() })
            .await
            .unwrap();
        store
            .insert_restaurant_pizza(&NewRestaurantPizza { price: 10, restaurant_id: r.id, pizza_id: p.id })
            .await
            .unwrap();
        (store, r, p)
    }

    #[tokio::test]
    async fn delete_cascades_to_offerings_but_keeps_pizzas() {
        let (store, r, p) = store_with_offering().await;
        assert!(store.delete_restaurant(r.id).await.unwrap());
        assert!(store.list_restaurant_pizzas().await.unwrap().is_empty());
        assert_eq!(store.get_pizza(p.id).await.unwrap(), Some(p));
        assert!(!store.delete_restaurant(r.id).await.unwrap());
    }

    #[tokio::test]
    async fn insert_rejects_missing_references() {
        let (store, r, p) = store_with_offering().await;
        let err = store
            .insert_restaurant_pizza(&NewRestaurantPizza { price: 5, restaurant_id: r.id, pizza_id: 99 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::PizzaNotFound(99))));
        let err = store
            .insert_restaurant_pizza(&NewRestaurantPizza { price: 5, restaurant_id: 42, pizza_id: p.id })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::RestaurantNotFound(42))));
        assert_eq!(store.list_restaurant_pizzas().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (store, r, _) = store_with_offering().await;
        store.delete_restaurant(r.id).await.unwrap();
        let again = store
            .insert_restaurant(&NewRestaurant { name: "B".into(), address: "2 St".into() })
            .await
            .unwrap();
        assert_eq!(again.id, r.id + 1);
    }
}
