//! Imports a small embedded catalog twice into an in-memory store, showing
//! the insert-then-update reconciliation.
//!
//! Run with: `cargo run --example import_products`

use anyhow::Result;

use stockpilot::{
    app::App,
    store::memory::InMemoryStore,
    ui::{LogProgress, Prompter},
};

const CSV: &str = "Référence,Désignation,Prix achat,Prix vente,Stock actuel
REF-001,Clavier mécanique,\"45,00\",\"89,90\",12
REF-002,Souris sans fil,\"12,50\",\"29,90\",40
REF-003,\"Écran 27\",140.00,229.00,3";

struct AcceptAll;

impl Prompter for AcceptAll {
    fn confirm(&self, message: &str) -> bool {
        println!("{message}");
        println!("-> auto-confirming");
        true
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let store = InMemoryStore::new();
    let prompter = AcceptAll;
    let progress = LogProgress;
    let mut app = App::new(&store, &prompter, &progress);

    let first = app.import_csv_text(CSV, Some("initial-load".to_string())).await?;
    println!(
        "first pass: {} imported, {} errors in {:?}",
        first.success_count, first.error_count, first.duration
    );

    // Same file again: every reference now matches, so the catalog is
    // updated in place instead of growing.
    let second = app.import_csv_text(CSV, Some("re-import".to_string())).await?;
    println!(
        "second pass: {} imported, {} errors",
        second.success_count, second.error_count
    );

    for product in store.products() {
        println!("#{} {} -> {}", product.id, product.reference, serde_json::to_string(&product.payload)?);
    }

    Ok(())
}
