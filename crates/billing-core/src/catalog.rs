//! # Catalog
//!
//! The fixed, read-only list of products on sale.
//!
//! The catalog is closed: products are defined once at startup and never
//! mutated. Every product has a unique id and a positive price, so nothing
//! free or unknown can reach the cart.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::{Product, ProductId};
use crate::validation::ValidationResult;

/// Ordered, immutable product list.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from an ordered product list.
    ///
    /// Rejects non-positive prices and duplicate ids.
    pub fn new(products: Vec<Product>) -> ValidationResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            if !product.price.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: format!("price of {}", product.name),
                });
            }
            if !seen.insert(product.id) {
                return Err(ValidationError::InvalidFormat {
                    field: "product id".to_string(),
                    reason: format!("{} is used more than once", product.id),
                });
            }
        }

        Ok(Catalog { products })
    }

    /// The shop's standard shelf.
    ///
    /// Prices are as stocked. BRU Instant Coffee really is listed at ₹10.
    pub fn standard() -> Self {
        Catalog {
            products: vec![
                Product::new(1, "Milk (1 litre)", 50),
                Product::new(2, "Bread", 30),
                Product::new(3, "Eggs (Dozen)", 60),
                Product::new(4, "Rice (1kg)", 80),
                Product::new(5, "Apples (1kg)", 120),
                Product::new(6, "Milk (Half litre)", 30),
                Product::new(7, "Milk Biscuit", 30),
                Product::new(8, "Surf Detergent (1kg)", 35),
                Product::new(9, "3 Roses Tea Dust", 45),
                Product::new(10, "BRU Instant Coffee", 10),
                Product::new(11, "Dal", 120),
            ],
        }
    }

    /// All products, in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}
