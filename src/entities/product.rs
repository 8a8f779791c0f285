use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;

/// Product document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    /// Assigned by the database on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Product description is required"))]
    pub description: String,

    pub price: f64,

    pub stock: f64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        stock: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            stock,
        }
    }
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";
}
