use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::Bson;
use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::Entity;

/// Order document. `product_id` is not checked against the products collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(deserialize_with = "object_id_or_hex")]
    pub product_id: ObjectId,

    pub quantity: f64,

    pub total_amount: f64,

    #[serde(default = "Utc::now", with = "chrono_datetime_as_bson_datetime")]
    pub order_date: DateTime<Utc>,
}

impl Order {
    pub fn new(product_id: ObjectId, quantity: f64, total_amount: f64) -> Self {
        Self {
            id: None,
            product_id,
            quantity,
            total_amount,
            order_date: Utc::now(),
        }
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";
}

/// Accepts a stored ObjectId or its 24-character hex string.
fn object_id_or_hex<'de, D>(deserializer: D) -> Result<ObjectId, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::ObjectId(id) => Ok(id),
        Bson::String(hex) => ObjectId::parse_str(&hex).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected an ObjectId, found {:?}",
            other.element_type()
        ))),
    }
}
