//! Product listings and inventory.

use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use souk_token::{Address, Amount};

/// A listed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Sequential id, starting at 1. Immutable.
    pub id: u64,
    /// Product name.
    pub name: String,
    /// Image URL.
    pub image_url: String,
    /// Price in token base units. Positive.
    pub price: Amount,
    /// Owning seller identity.
    pub seller: Address,
    /// Seller display name, snapshotted at listing time.
    pub seller_name: String,
    /// Free-text description.
    pub description: String,
    /// Units currently available for purchase.
    pub inventory: u64,
    /// Units sold and confirmed. Monotonic.
    pub total_sold: u64,
}

/// Catalog state: all products, in listing order.
///
/// Product ids are 1-based; id N lives at index N-1.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// List a new product and return its id.
    ///
    /// Registry-level checks (seller registered and unblocked) belong to
    /// the caller; this validates only the listing fields.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty name or image, a zero price, or zero
    /// inventory.
    pub fn create(
        &mut self,
        seller: Address,
        seller_name: String,
        name: &str,
        image_url: &str,
        price: Amount,
        description: &str,
        inventory: u64,
    ) -> Result<u64, MarketError> {
        if name.is_empty() {
            return Err(MarketError::validation("product name must not be empty"));
        }
        if image_url.is_empty() {
            return Err(MarketError::validation("product image must not be empty"));
        }
        if price.is_zero() {
            return Err(MarketError::validation("price must be positive"));
        }
        if inventory == 0 {
            return Err(MarketError::validation("inventory must be positive"));
        }

        let id = self.products.len() as u64 + 1;
        self.products.push(Product {
            id,
            name: name.to_string(),
            image_url: image_url.to_string(),
            price,
            seller,
            seller_name,
            description: description.to_string(),
            inventory,
            total_sold: 0,
        });
        Ok(id)
    }

    /// Look up a product by id.
    ///
    /// Id 0 and ids beyond the current count yield `None`; callers that
    /// need a hard failure map this to `ProductNotFound` themselves.
    #[must_use]
    pub fn product(&self, id: u64) -> Option<&Product> {
        if id == 0 {
            return None;
        }
        self.products.get(id as usize - 1)
    }

    /// Look up a product by id for mutation.
    pub fn product_mut(&mut self, id: u64) -> Option<&mut Product> {
        if id == 0 {
            return None;
        }
        self.products.get_mut(id as usize - 1)
    }

    /// Number of products ever listed.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.products.len() as u64
    }
}
