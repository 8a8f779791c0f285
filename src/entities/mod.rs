//! Document shapes persisted in MongoDB.
//!
//! Each entity maps 1:1 to a collection. Decoding a raw document goes through
//! [`Entity::from_document`], which rejects missing or empty required fields.

pub mod order;
pub mod product;

pub use order::Order;
pub use product::Product;

use mongodb::bson::{self, Document};
use mongodb::{Collection, Database};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::errors::ServiceError;

pub trait Entity: Serialize + DeserializeOwned + Validate + Send + Sync + Unpin + Sized {
    /// Name of the backing collection
    const COLLECTION: &'static str;

    fn collection(db: &Database) -> Collection<Self> {
        db.collection::<Self>(Self::COLLECTION)
    }

    /// Decodes a raw document and applies field validation.
    fn from_document(document: Document) -> Result<Self, ServiceError> {
        let entity: Self = bson::from_document(document)?;
        entity.validate()?;
        Ok(entity)
    }

    /// Validates and encodes the entity for storage.
    fn to_document(&self) -> Result<Document, ServiceError> {
        self.validate()?;
        Ok(bson::to_document(self)?)
    }
}
