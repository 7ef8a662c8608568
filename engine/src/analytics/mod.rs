// Dashboard aggregations over a filtered record set.
pub mod kpi;
pub mod monthly;
pub mod regions;
pub mod status_distribution;
pub mod top_products;

pub use kpi::KpiAggregator;
pub use monthly::MonthlySeries;
pub use regions::RegionRanking;
pub use status_distribution::StatusDistribution;
pub use top_products::TopProducts;

use crate::filter::FilterScope;
use shared::models::{FilterSpec, Record};
use std::borrow::Cow;

pub const NO_REGION: &str = "Sin región";
pub const NO_SUB_REGION: &str = "Sin comuna";
pub const NO_SKU: &str = "Sin SKU";
pub const NO_TITLE: &str = "Sin título";

// Common trait for all dashboard views
pub trait Aggregator: Send + Sync {
    type Output;

    fn name(&self) -> &str;
    fn scope(&self) -> FilterScope;
    /// Filters `records` with `filter` under this aggregator's scope and
    /// derives the view. Never mutates its input.
    fn aggregate(&self, records: &[Record], filter: &FilterSpec) -> Self::Output;
}

pub(crate) fn or_placeholder(value: Cow<'_, str>, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.into_owned()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::ColumnNames;
    use crate::data::SalesFileParser;
    use shared::models::Record;

    pub const HEADER: &str = "Fecha de venta;Estado;Estado;Comuna;Total (CLP);SKU;Título de la publicación;Unidades";

    /// Parses body rows written under the default export header.
    pub fn records(rows: &[&str]) -> Vec<Record> {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        SalesFileParser::parse_delimited(&text, &ColumnNames::default())
    }
}
