//! PostgreSQL engine: table DDL, database bootstrap, and the sqlx-backed store.

use super::PizzaStore;
use crate::error::{AppError, ValidationError};
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
    RestaurantPizzaWithPizza,
};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const FK_RESTAURANT: &str = "fk_restaurant_pizzas_restaurant_id_restaurants";
const FK_PIZZA: &str = "fk_restaurant_pizzas_pizza_id_pizzas";

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pizzas (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        ingredients TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_pizzas (
        id SERIAL PRIMARY KEY,
        price INTEGER NOT NULL CONSTRAINT ck_restaurant_pizzas_price CHECK (price BETWEEN 1 AND 30),
        restaurant_id INTEGER NOT NULL
            CONSTRAINT fk_restaurant_pizzas_restaurant_id_restaurants REFERENCES restaurants (id),
        pizza_id INTEGER NOT NULL
            CONSTRAINT fk_restaurant_pizzas_pizza_id_pizzas REFERENCES pizzas (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_restaurant_pizzas_restaurant_id ON restaurant_pizzas (restaurant_id)",
];

/// Create the three tables and their foreign keys if missing. Safe to run on every start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("tables ensured");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Internal("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct OfferingRow {
    id: i32,
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
    pizza_name: String,
    pizza_ingredients: String,
}

impl From<OfferingRow> for RestaurantPizzaWithPizza {
    fn from(row: OfferingRow) -> Self {
        RestaurantPizzaWithPizza {
            id: row.id,
            price: row.price,
            restaurant_id: row.restaurant_id,
            pizza_id: row.pizza_id,
            pizza: Pizza {
                id: row.pizza_id,
                name: row.pizza_name,
                ingredients: row.pizza_ingredients,
            },
        }
    }
}

/// Maps constraint violations on insert back to the offending field.
fn map_insert_error(e: sqlx::Error, new: &NewRestaurantPizza) -> AppError {
    let (fk_violation, check_violation, constraint) = match &e {
        sqlx::Error::Database(db) => (
            db.is_foreign_key_violation(),
            db.is_check_violation(),
            db.constraint().map(str::to_owned),
        ),
        _ => (false, false, None),
    };
    match constraint.as_deref() {
        Some(FK_PIZZA) if fk_violation => ValidationError::PizzaNotFound(new.pizza_id).into(),
        Some(FK_RESTAURANT) if fk_violation => {
            ValidationError::RestaurantNotFound(new.restaurant_id).into()
        }
        _ if check_violation => ValidationError::PriceOutOfRange {
            min: crate::service::PRICE_MIN,
            max: crate::service::PRICE_MAX,
            got: new.price.into(),
        }
        .into(),
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl PizzaStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let sql = "SELECT id, name, address FROM restaurants ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, AppError> {
        let sql = "SELECT id, name, address FROM restaurants WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, AppError> {
        let row = sqlx::query_as(
            "INSERT INTO restaurants (name, address) VALUES ($1, $2) RETURNING id, name, address",
        )
        .bind(&new.name)
        .bind(&new.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let found: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM restaurants WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if found.is_none() {
            return Ok(false);
        }
        let offerings = sqlx::query("DELETE FROM restaurant_pizzas WHERE restaurant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::debug!(id, offerings = offerings.rows_affected(), "restaurant deleted");
        Ok(true)
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        let sql = "SELECT id, name, ingredients FROM pizzas ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn get_pizza(&self, id: i32) -> Result<Option<Pizza>, AppError> {
        let sql = "SELECT id, name, ingredients FROM pizzas WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, AppError> {
        let row = sqlx::query_as(
            "INSERT INTO pizzas (name, ingredients) VALUES ($1, $2) RETURNING id, name, ingredients",
        )
        .bind(&new.name)
        .bind(&new.ingredients)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_restaurant_pizzas(&self) -> Result<Vec<RestaurantPizza>, AppError> {
        let sql = "SELECT id, price, restaurant_id, pizza_id FROM restaurant_pizzas ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn restaurant_pizzas_for(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPizzaWithPizza>, AppError> {
        let sql = r#"
            SELECT rp.id, rp.price, rp.restaurant_id, rp.pizza_id,
                   p.name AS pizza_name, p.ingredients AS pizza_ingredients
            FROM restaurant_pizzas rp
            JOIN pizzas p ON p.id = rp.pizza_id
            WHERE rp.restaurant_id = $1
            ORDER BY rp.id
        "#;
        tracing::debug!(sql = %sql, restaurant_id, "query");
        let rows: Vec<OfferingRow> = sqlx::query_as(sql)
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_restaurant_pizza(
        &self,
        new: &NewRestaurantPizza,
    ) -> Result<RestaurantPizza, AppError> {
        sqlx::query_as(
            r#"
            INSERT INTO restaurant_pizzas (price, restaurant_id, pizza_id)
            VALUES ($1, $2, $3)
            RETURNING id, price, restaurant_id, pizza_id
            "#,
        )
        .bind(new.price)
        .bind(new.restaurant_id)
        .bind(new.pizza_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, new))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_points_at_postgres_database() {
        let (admin, db) =
            parse_db_name_from_url("postgres://user:pw@localhost:5432/pizzeria?sslmode=disable")
                .unwrap();
        assert_eq!(admin, "postgres://user:pw@localhost:5432/postgres");
        assert_eq!(db, "pizzeria");
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("pi\"zza"), "\"pi\"\"zza\"");
    }

    #[test]
    fn non_database_errors_stay_internal() {
        let new = NewRestaurantPizza { price: 5, restaurant_id: 1, pizza_id: 1 };
        assert!(matches!(
            map_insert_error(sqlx::Error::PoolClosed, &new),
            AppError::Db(sqlx::Error::PoolClosed)
        ));
    }
}
