/*!
 # StockPilot

 Inventory-management core for the StockPilot application. The centerpiece is
 the **CSV product import pipeline**: parse a user-supplied delimited file into
 validated product records, reconcile every record against the existing catalog
 (update-if-exists by reference, insert-if-new) and drive the reconciliation
 through a strictly sequential remote-write workflow with progress reporting
 and partial-failure tolerance.

 ## Core Concepts

 - **ProductCsvParser:** turns a whole CSV text into an ordered sequence of
   [`ProductRecord`](csv::record::ProductRecord)s, silently dropping blank,
   malformed and reference-less rows.
 - **Reconciliation:** looks up a record's `reference` in the current catalog
   and copies the matching entry's `id` into the record, marking it for an
   update instead of an insert.
 - **ImportJob:** the batch driver. Asks for a count-naming confirmation up
   front, then processes records one at a time in file order, tallying
   successes and errors without ever aborting the batch.
 - **ProductStore:** the narrow read/write contract of the remote catalog
   (`get_products` / `save_product`). Implement it for your backend, or use
   the bundled [`InMemoryStore`](store::memory::InMemoryStore).
 - **App:** the top-level controller owning the active view and the view
   registry; its `import_csv_file` entry point wires file reading, parsing,
   the import job and the products-view refresh together.

 ## Getting Started

```rust
use stockpilot::{
    core::import::{ImportJobBuilder, ImportStatus},
    csv::parser::ProductCsvParserBuilder,
    store::memory::InMemoryStore,
    ui::Prompter,
};

struct AcceptAll;

impl Prompter for AcceptAll {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
    fn notify(&self, _message: &str) {}
}

#[tokio::main]
async fn main() -> Result<(), stockpilot::ImportError> {
    let csv = "Référence,Désignation,Prix vente,Stock actuel
REF-001,Clavier mécanique,\"89,90\",12
REF-002,Souris sans fil,\"29,90\",40";

    let parser = ProductCsvParserBuilder::new().build();
    let records = parser.parse(csv);

    let store = InMemoryStore::new();
    let prompter = AcceptAll;

    let job = ImportJobBuilder::new()
        .store(&store)
        .prompter(&prompter)
        .build();

    let summary = job.run(records).await?;

    assert_eq!(summary.status, ImportStatus::Completed);
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.error_count, 0);

    Ok(())
}
```
*/

/// Top-level application controller and view collaborators
pub mod app;

/// Core module for import operations
pub mod core;

/// CSV tokenizing, record mapping and parsing
pub mod csv;

/// Error types for import operations
pub mod error;

/// Remote product store contract and implementations
pub mod store;

/// User-facing prompts and progress reporting
pub mod ui;

#[doc(inline)]
pub use error::*;
