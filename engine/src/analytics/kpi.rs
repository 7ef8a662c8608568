// Headline KPIs for the global filter.
use super::{or_placeholder, Aggregator, NO_REGION, NO_SUB_REGION};
use crate::classify::SaleClassifier;
use crate::config::{ColumnNames, DashboardSettings};
use crate::filter::{self, FilterScope};
use shared::models::{FilterSpec, KpiSummary, Record};
use shared::utils::chilean_format::amount_of;
use std::collections::HashSet;

pub struct KpiAggregator {
    columns: ColumnNames,
    sales: SaleClassifier,
}

impl KpiAggregator {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            columns: settings.columns.clone(),
            sales: SaleClassifier,
        }
    }
}

impl Aggregator for KpiAggregator {
    type Output = KpiSummary;

    fn name(&self) -> &str {
        "kpis"
    }

    fn scope(&self) -> FilterScope {
        FilterScope::Global
    }

    fn aggregate(&self, records: &[Record], filter: &FilterSpec) -> KpiSummary {
        let mut summary = KpiSummary::default();
        let mut regions = HashSet::new();
        let mut sub_regions = HashSet::new();

        for record in filter::apply(records, filter, self.scope(), &self.columns) {
            let status = record.text(&self.columns.status);
            if self.sales.is_cancelled(&status) {
                summary.cancelled += 1;
            }
            if self.sales.is_problematic(&status) {
                summary.problematic += 1;
            }
            if !self.sales.is_valid_sale(&status) {
                continue;
            }

            summary.valid_sales += 1;
            summary.total_revenue += amount_of(record.get(&self.columns.amount));
            regions.insert(or_placeholder(record.text(&self.columns.region), NO_REGION));
            sub_regions.insert(or_placeholder(record.text(&self.columns.sub_region), NO_SUB_REGION));
        }

        if summary.valid_sales > 0 {
            summary.average_order_value = summary.total_revenue / summary.valid_sales as f64;
        }
        summary.distinct_regions = regions.len();
        summary.distinct_sub_regions = sub_regions.len();
        summary
    }
}
