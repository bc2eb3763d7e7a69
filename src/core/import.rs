//! Sequential batch import of product records.

use std::time::{Duration, Instant};

use log::{error, info};
use tokio::time::timeout;
use uuid::Uuid;

use crate::{
    csv::record::ProductRecord,
    error::ImportError,
    store::{CatalogEntry, ProductStore},
    ui::{LogProgress, ProgressReporter, Prompter},
};

use super::{build_name, reconcile::reconcile};

/// How often the catalog is fetched for reconciliation lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFetchPolicy {
    /// Fetch the catalog once, before the first record.
    #[default]
    PerBatch,
    /// Re-fetch the catalog before every record's decision, always seeing the
    /// latest state at the cost of one extra remote read per record.
    PerRecord,
}

/// Terminal state of one import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// The batch ran to the end; per-record failures are in the error tally.
    Completed,
    /// The user declined the confirmation; no side effects took place.
    Cancelled,
    /// There was nothing to import.
    Empty,
}

/// Outcome of one import batch.
#[derive(Debug)]
pub struct ImportSummary {
    pub id: Uuid,
    pub name: String,
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    pub status: ImportStatus,
    pub total: usize,
    pub success_count: usize,
    pub error_count: usize,
}

/// Drives one batch of records through reconciliation and remote writes.
///
/// The batch is strictly sequential: records are processed in file order, one
/// at a time, each remote call awaited before the next record starts. A
/// failure of either reconciliation or the save call increments the error
/// tally and is logged with the record's reference; it never stops the loop.
/// Once the user has confirmed, the batch always reaches `Completed`.
pub struct ImportJob<'a> {
    id: Uuid,
    name: String,
    store: &'a dyn ProductStore,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressReporter,
    fetch_policy: CatalogFetchPolicy,
    call_timeout: Option<Duration>,
}

impl ImportJob<'_> {
    /// Runs the batch and returns its summary.
    ///
    /// The only hard failures are the up-front catalog fetch (with the
    /// `PerBatch` policy) and its optional timeout; everything record-level
    /// is absorbed into the tallies.
    pub async fn run(&self, records: Vec<ProductRecord>) -> Result<ImportSummary, ImportError> {
        let start = Instant::now();
        let total = records.len();

        if records.is_empty() {
            self.prompter.notify("No products found in the CSV file");
            return Ok(self.summary(start, ImportStatus::Empty, 0, 0, 0));
        }

        let confirmed = self.prompter.confirm(&format!(
            "You are about to import {total} product(s).\n\n\
             Existing products (same reference) will be updated.\n\
             New products will be added.\n\n\
             Continue?"
        ));

        if !confirmed {
            info!("import {} cancelled by the user", self.name);
            return Ok(self.summary(start, ImportStatus::Cancelled, total, 0, 0));
        }

        info!("Start of import: {}, id: {}", self.name, self.id);

        self.progress.begin(total);

        let batch_catalog = match self.fetch_policy {
            CatalogFetchPolicy::PerBatch => match self.fetch_catalog().await {
                Ok(catalog) => Some(catalog),
                Err(err) => {
                    self.progress.end();
                    return Err(err);
                }
            },
            CatalogFetchPolicy::PerRecord => None,
        };

        let mut success_count = 0;
        let mut error_count = 0;

        for (index, mut record) in records.into_iter().enumerate() {
            self.progress.update(index + 1, total);

            let reference = record.reference().unwrap_or("?").to_string();

            let fresh_catalog;
            let catalog: &[CatalogEntry] = match &batch_catalog {
                Some(catalog) => catalog,
                None => match self.fetch_catalog().await {
                    Ok(catalog) => {
                        fresh_catalog = catalog;
                        &fresh_catalog
                    }
                    Err(err) => {
                        error_count += 1;
                        error!("failed to fetch catalog for product {reference}: {err}");
                        continue;
                    }
                },
            };

            reconcile(&mut record, catalog);

            match self.save_product(&record).await {
                Ok(()) => success_count += 1,
                Err(err) => {
                    error_count += 1;
                    error!("failed to import product {reference}: {err}");
                }
            }
        }

        self.progress.end();

        let mut message = format!("Import finished!\n\n{success_count} product(s) imported");
        if error_count > 0 {
            message.push_str(&format!("\n{error_count} error(s)"));
        }
        self.prompter.notify(&message);

        info!(
            "End of import: {}: {} success, {} errors",
            self.name, success_count, error_count
        );

        Ok(self.summary(start, ImportStatus::Completed, total, success_count, error_count))
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ImportError> {
        match self.call_timeout {
            Some(limit) => timeout(limit, self.store.get_products())
                .await
                .map_err(|_| ImportError::Timeout(limit))?,
            None => self.store.get_products().await,
        }
    }

    async fn save_product(&self, record: &ProductRecord) -> Result<(), ImportError> {
        match self.call_timeout {
            Some(limit) => timeout(limit, self.store.save_product(record))
                .await
                .map_err(|_| ImportError::Timeout(limit))?,
            None => self.store.save_product(record).await,
        }
    }

    fn summary(
        &self,
        start: Instant,
        status: ImportStatus,
        total: usize,
        success_count: usize,
        error_count: usize,
    ) -> ImportSummary {
        ImportSummary {
            id: self.id,
            name: self.name.clone(),
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            status,
            total,
            success_count,
            error_count,
        }
    }
}

/// Builder for creating an import job.
#[derive(Default)]
pub struct ImportJobBuilder<'a> {
    name: Option<String>,
    store: Option<&'a dyn ProductStore>,
    prompter: Option<&'a dyn Prompter>,
    progress: Option<&'a dyn ProgressReporter>,
    fetch_policy: CatalogFetchPolicy,
    call_timeout: Option<Duration>,
}

impl<'a> ImportJobBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the batch; generated randomly if not specified.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn store(mut self, store: &'a dyn ProductStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn prompter(mut self, prompter: &'a dyn Prompter) -> Self {
        self.prompter = Some(prompter);
        self
    }

    pub fn progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn fetch_policy(mut self, fetch_policy: CatalogFetchPolicy) -> Self {
        self.fetch_policy = fetch_policy;
        self
    }

    /// Sets a per-call deadline on every remote store call.
    ///
    /// Without one, a hanging call stalls the batch indefinitely, which was
    /// the reference behavior.
    pub fn call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = Some(call_timeout);
        self
    }

    pub fn build(self) -> ImportJob<'a> {
        ImportJob {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            store: self.store.unwrap(),
            prompter: self.prompter.unwrap(),
            progress: self.progress.unwrap_or(&LogProgress),
            fetch_policy: self.fetch_policy,
            call_timeout: self.call_timeout,
        }
    }
}
