//! The narrow read/write contract of the remote product catalog.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{csv::record::ProductRecord, error::ImportError};

pub mod memory;

/// One existing catalog entity, as seen by the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub reference: String,
}

/// Remote product store consumed by the import pipeline.
///
/// `get_products` returns the full current catalog in a stable order.
/// `save_product` upserts one product: when the record carries an `id` the
/// matching entity is updated, otherwise a new one is created. Failures must
/// be reported through `Err` so the import driver can tally them without
/// halting the batch.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_products(&self) -> Result<Vec<CatalogEntry>, ImportError>;

    async fn save_product(&self, record: &ProductRecord) -> Result<(), ImportError>;
}
