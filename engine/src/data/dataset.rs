// Immutable snapshot of the records parsed from one upload.
use crate::config::ColumnNames;
use shared::models::{FilterOptions, Record};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Records from a single file. A new upload builds a new `Dataset`; existing
/// snapshots are never appended to.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: String,
    records: Arc<[Record]>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, records: Vec<Record>) -> Self {
        Dataset {
            source: source.into(),
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new(), Vec::new())
    }

    /// Name of the file the records came from; empty for the initial dataset.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct four-digit sale years, ascending.
    pub fn available_years(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter_map(|r| r.sale_date())
            .map(|d| d.full_year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty regions, sorted.
    pub fn available_regions(&self, columns: &ColumnNames) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.text(&columns.region))
            .filter(|region| !region.is_empty())
            .map(|region| region.into_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn filter_options(&self, columns: &ColumnNames) -> FilterOptions {
        FilterOptions {
            years: self.available_years(),
            regions: self.available_regions(columns),
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record_parser::SalesFileParser;

    fn sample() -> Dataset {
        let text = "Fecha de venta;Estado;Estado\n\
                    01-01-24;Entregado;RM\n\
                    15-06-23;Entregado;Biobío\n\
                    ;Cancelada;RM\n\
                    20-07-23;Cancelada;\n";
        Dataset::new("ventas.csv", SalesFileParser::parse_delimited(text, &ColumnNames::default()))
    }

    #[test]
    fn test_available_years_are_sorted_and_distinct() {
        assert_eq!(sample().available_years(), vec![2023, 2024]);
    }

    #[test]
    fn test_available_regions_skip_blank() {
        assert_eq!(sample().available_regions(&ColumnNames::default()), vec!["Biobío", "RM"]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty();
        assert!(dataset.is_empty());
        assert_eq!(dataset.source(), "");
        assert_eq!(dataset.filter_options(&ColumnNames::default()), FilterOptions::default());
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = sample();
        let copy = dataset.clone();
        assert_eq!(copy.len(), 4);
        assert!(std::ptr::eq(dataset.records().as_ptr(), copy.records().as_ptr()));
    }
}
