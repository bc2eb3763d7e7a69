//! Product records and the header-to-field mapping rules.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

/// Field keys coerced as decimal prices (comma accepted as decimal separator).
const PRICE_FIELDS: [&str; 2] = ["prix_achat", "prix_vente"];

/// Field keys coerced as integer stock quantities.
const QUANTITY_FIELDS: [&str; 3] = ["stock_actuel", "stock_minimum", "stock_maximum"];

/// A single coerced field value of a product record.
///
/// Serializes transparently: prices as JSON numbers, quantities as JSON
/// integers, everything else as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Price(f64),
    Quantity(i64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_price(&self) -> Option<f64> {
        match self {
            FieldValue::Price(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<i64> {
        match self {
            FieldValue::Quantity(value) => Some(*value),
            _ => None,
        }
    }
}

/// One validated product, mapped from a CSV row.
///
/// A record is constructed fresh per row by [`from_row`](Self::from_row),
/// optionally gains an `id` during reconciliation, is handed once to the
/// store's save call and then discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl ProductRecord {
    /// Maps a header row plus a value row into a record.
    ///
    /// The caller must guarantee equal lengths; rows with a mismatched field
    /// count are skipped upstream by the parser. Returns `None` when the row
    /// carries no usable (non-empty) `reference`.
    pub fn from_row(headers: &[String], values: &[String]) -> Option<ProductRecord> {
        debug_assert_eq!(headers.len(), values.len());

        let mut record = ProductRecord::default();

        for (header, value) in headers.iter().zip(values) {
            let key = field_key(header.trim());
            let coerced = coerce(&key, value);
            record.insert(key, coerced);
        }

        if record.reference().is_some() {
            Some(record)
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// The business key of the record, if present and non-empty.
    pub fn reference(&self) -> Option<&str> {
        match self.fields.get("reference") {
            Some(FieldValue::Text(reference)) if !reference.is_empty() => Some(reference),
            _ => None,
        }
    }

    /// The catalog id marking this record for an update, if any.
    pub fn id(&self) -> Option<i64> {
        match self.fields.get("id") {
            Some(FieldValue::Quantity(id)) => Some(*id),
            Some(FieldValue::Text(id)) => id.parse().ok(),
            _ => None,
        }
    }

    /// Marks the record for an update of the given catalog entry.
    pub fn assign_id(&mut self, id: i64) {
        self.fields.insert("id".to_string(), FieldValue::Quantity(id));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record as a JSON object, ready to ship to a remote store.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Resolves a display header to its internal field key.
///
/// Unrecognized headers fall back to the lower-cased, space-to-underscore
/// transformation of the display text. That fallback is what lets extra
/// columns flow through the import untouched, so it must be kept as is.
pub fn field_key(header: &str) -> String {
    let key = match header {
        "ID" => "id",
        "Référence" => "reference",
        "Désignation" => "designation",
        "Catégorie" => "categorie",
        "Fournisseur" => "fournisseur",
        "Prix achat" => "prix_achat",
        "Prix vente" => "prix_vente",
        "Stock actuel" => "stock_actuel",
        "Stock minimum" => "stock_minimum",
        "Stock maximum" => "stock_maximum",
        "Emplacement" => "emplacement",
        "Date entrée" => "date_entree",
        "Notes" => "notes",
        other => return other.to_lowercase().replace(' ', "_"),
    };

    key.to_string()
}

/// Applies the coercion table to one raw field value.
///
/// Prices accept a comma as decimal separator, empty numerics default to 0.
/// A non-empty token that fails numeric parsing also resolves to 0, with a
/// diagnostic; the row itself is never rejected for it.
pub fn coerce(key: &str, raw: &str) -> FieldValue {
    let value = raw.trim();

    if PRICE_FIELDS.contains(&key) {
        if value.is_empty() {
            return FieldValue::Price(0.0);
        }
        match value.replace(',', ".").parse::<f64>() {
            Ok(price) => FieldValue::Price(price),
            Err(_) => {
                warn!("unparsable value {value:?} for price field {key}, defaulting to 0");
                FieldValue::Price(0.0)
            }
        }
    } else if QUANTITY_FIELDS.contains(&key) {
        if value.is_empty() {
            return FieldValue::Quantity(0);
        }
        match value.parse::<i64>() {
            Ok(quantity) => FieldValue::Quantity(quantity),
            Err(_) => {
                warn!("unparsable value {value:?} for stock field {key}, defaulting to 0");
                FieldValue::Quantity(0)
            }
        }
    } else {
        FieldValue::Text(value.to_string())
    }
}
