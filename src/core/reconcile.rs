//! Insert-or-update decisions against the current catalog.

use crate::{csv::record::ProductRecord, store::CatalogEntry};

/// Decides insert vs. update for one record.
///
/// Linear search for the first catalog entry whose `reference` equals the
/// record's, exact and case-sensitive. On a match the entry's `id` is copied
/// into the record, marking it for an update; otherwise the record is left
/// without an `id`, marking it for creation. Always resolves to one of the
/// two branches.
pub fn reconcile(record: &mut ProductRecord, catalog: &[CatalogEntry]) {
    let Some(reference) = record.reference() else {
        return;
    };

    let existing = catalog
        .iter()
        .find(|entry| entry.reference == reference)
        .map(|entry| entry.id);

    if let Some(id) = existing {
        record.assign_id(id);
    }
}
