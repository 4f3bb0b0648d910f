//! Request validation for restaurant_pizzas creation.

use crate::error::ValidationError;
use serde_json::Value;

pub const PRICE_MIN: i64 = 1;
pub const PRICE_MAX: i64 = 30;

/// Create request with both ids checked for shape. `price` stays raw until the
/// referenced rows have been looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRestaurantPizza {
    pub price: Option<Value>,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

impl CreateRestaurantPizza {
    /// Read `price`, `pizza_id` and `restaurant_id` from a JSON object. Other keys are ignored.
    pub fn from_body(body: &Value) -> Result<Self, ValidationError> {
        let obj = body
            .as_object()
            .ok_or_else(|| ValidationError::MalformedBody("expected an object".into()))?;
        Ok(Self {
            price: obj.get("price").filter(|v| !v.is_null()).cloned(),
            pizza_id: id_field(obj.get("pizza_id"), "pizza_id")?,
            restaurant_id: id_field(obj.get("restaurant_id"), "restaurant_id")?,
        })
    }
}

fn id_field(v: Option<&Value>, name: &'static str) -> Result<i32, ValidationError> {
    let v = match v {
        None | Some(Value::Null) => return Err(ValidationError::MissingField(name)),
        Some(v) => v,
    };
    v.as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(ValidationError::NotAnInteger(name))
}

/// Price must be a JSON integer (not a float, string or bool) in [PRICE_MIN, PRICE_MAX].
pub fn validate_price(v: Option<&Value>) -> Result<i32, ValidationError> {
    let v = v.ok_or(ValidationError::MissingField("price"))?;
    let n = v.as_i64().ok_or(ValidationError::NotAnInteger("price"))?;
    if !(PRICE_MIN..=PRICE_MAX).contains(&n) {
        return Err(ValidationError::PriceOutOfRange {
            min: PRICE_MIN,
            max: PRICE_MAX,
            got: n,
        });
    }
    // In range, so it fits.
    Ok(n as i32)
}
