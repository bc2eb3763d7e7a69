//! In-memory product store, for embedding and for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{csv::record::ProductRecord, error::ImportError};

use super::{CatalogEntry, ProductStore};

/// One product held by the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub id: i64,
    pub reference: String,
    pub payload: Value,
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<StoredProduct>,
    next_id: i64,
}

/// A [`ProductStore`] backed by a plain vector.
///
/// Ids are assigned sequentially starting at 1. Payloads are kept as the JSON
/// objects the records serialize to, which is also what a remote HTTP store
/// would receive.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing references, one entry per reference.
    pub fn with_references<'a>(references: impl IntoIterator<Item = &'a str>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().unwrap();
            for reference in references {
                inner.next_id += 1;
                let id = inner.next_id;
                inner.products.push(StoredProduct {
                    id,
                    reference: reference.to_string(),
                    payload: Value::Null,
                });
            }
        }
        store
    }

    /// A snapshot of the current catalog content, for assertions.
    pub fn products(&self) -> Vec<StoredProduct> {
        self.inner.lock().unwrap().products.clone()
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn get_products(&self) -> Result<Vec<CatalogEntry>, ImportError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .products
            .iter()
            .map(|product| CatalogEntry {
                id: product.id,
                reference: product.reference.clone(),
            })
            .collect())
    }

    async fn save_product(&self, record: &ProductRecord) -> Result<(), ImportError> {
        let reference = record
            .reference()
            .ok_or_else(|| ImportError::Store("record has no reference".to_string()))?
            .to_string();

        let mut inner = self.inner.lock().unwrap();

        if let Some(id) = record.id() {
            let existing = inner
                .products
                .iter_mut()
                .find(|product| product.id == id)
                .ok_or_else(|| ImportError::Store(format!("no product with id {id}")))?;
            existing.reference = reference;
            existing.payload = record.to_json();
            return Ok(());
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.products.push(StoredProduct {
            id,
            reference,
            payload: record.to_json(),
        });
        Ok(())
    }
}
