use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a catalog product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
    pub brand: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted on create/update; everything else is store-owned.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
    pub brand: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,

    #[error("product store failed: {0}")]
    Store(String),
}

/// In-memory product catalog.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Product>>, ProductError> {
        self.products
            .read()
            .map_err(|_| ProductError::Store("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Product>>, ProductError> {
        self.products
            .write()
            .map_err(|_| ProductError::Store("lock poisoned".to_string()))
    }

    pub fn create(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        let product = Product {
            id: ProductId::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category: draft.category,
            brand: draft.brand,
            image_url: draft.image_url,
            created_at: Utc::now(),
        };

        self.write()?.push(product.clone());
        Ok(product)
    }

    pub fn list(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: ProductId) -> Result<Product, ProductError> {
        self.read()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ProductError::NotFound)
    }

    pub fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, ProductError> {
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound)?;

        product.name = draft.name;
        product.description = draft.description;
        product.price = draft.price;
        product.stock = draft.stock;
        product.category = draft.category;
        product.brand = draft.brand;
        product.image_url = draft.image_url;

        Ok(product.clone())
    }

    /// Replace a product's stock level, leaving every other field alone.
    pub fn update_stock(&self, id: ProductId, stock: i64) -> Result<Product, ProductError> {
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound)?;

        product.stock = stock;
        Ok(product.clone())
    }

    pub fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        let mut products = self.write()?;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(ProductError::NotFound);
        }
        Ok(())
    }

    /// Case-insensitive match against name and description.
    pub fn search(&self, term: &str) -> Result<Vec<Product>, ProductError> {
        let term = term.to_lowercase();
        Ok(self
            .read()?
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
            })
            .cloned()
            .collect())
    }

    pub fn low_stock(&self, threshold: i64) -> Result<Vec<Product>, ProductError> {
        Ok(self
            .read()?
            .iter()
            .filter(|p| p.stock < threshold)
            .cloned()
            .collect())
    }

    pub fn by_category(&self, category: &str) -> Result<Vec<Product>, ProductError> {
        Ok(self
            .read()?
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    /// Inclusive price range.
    pub fn price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Product>, ProductError> {
        Ok(self
            .read()?
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
            .cloned()
            .collect())
    }

    /// Distinct category names, in first-seen order.
    pub fn categories(&self) -> Result<Vec<String>, ProductError> {
        let products = self.read()?;
        let mut categories: Vec<String> = Vec::new();
        for product in products.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }
}
