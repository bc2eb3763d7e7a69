//! Whole-file CSV parsing into product records.

use log::{debug, warn};

use super::{record::ProductRecord, tokenizer::split_line};

/// Parses a full CSV text into an ordered sequence of [`ProductRecord`]s.
///
/// Parsing never fails on malformed input; the worst case is an empty result.
/// Blank lines are filtered out, a file with fewer than two remaining lines
/// (header only, or nothing) yields no products, rows whose field count does
/// not match the header's are dropped with a diagnostic, and rows without a
/// usable reference are dropped silently.
///
/// # Examples
///
/// ```
/// use stockpilot::csv::parser::ProductCsvParserBuilder;
///
/// let csv = "Référence,Désignation\nREF-001,Clavier\n\nREF-002,Souris";
///
/// let parser = ProductCsvParserBuilder::new().build();
/// let records = parser.parse(csv);
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].reference(), Some("REF-001"));
/// ```
pub struct ProductCsvParser {
    delimiter: char,
}

impl ProductCsvParser {
    pub fn parse(&self, text: &str) -> Vec<ProductRecord> {
        let lines: Vec<&str> = text.split('\n').filter(|line| !line.trim().is_empty()).collect();

        if lines.len() < 2 {
            debug!("csv input has a header only or is empty, no products found");
            return Vec::new();
        }

        let headers: Vec<String> = split_line(lines[0], self.delimiter)
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let mut records = Vec::new();

        for (index, line) in lines.iter().enumerate().skip(1) {
            let values = split_line(line, self.delimiter);

            if values.len() != headers.len() {
                warn!(
                    "skipping line {}: expected {} fields, found {}",
                    index + 1,
                    headers.len(),
                    values.len()
                );
                continue;
            }

            match ProductRecord::from_row(&headers, &values) {
                Some(record) => records.push(record),
                None => debug!("skipping line {}: no reference", index + 1),
            }
        }

        records
    }
}

/// A builder for configuring CSV product parsing.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
#[derive(Debug, Clone)]
pub struct ProductCsvParserBuilder {
    delimiter: char,
}

impl Default for ProductCsvParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCsvParserBuilder {
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Sets the field delimiter, for semicolon or tab separated exports.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn build(self) -> ProductCsvParser {
        ProductCsvParser {
            delimiter: self.delimiter,
        }
    }
}
