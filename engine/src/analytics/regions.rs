// Customers per region
use super::{or_placeholder, Aggregator, NO_REGION};
use crate::classify::SaleClassifier;
use crate::config::{ColumnNames, DashboardSettings};
use crate::filter::{self, FilterScope};
use shared::models::{FilterSpec, Record, RegionRank};
use std::collections::HashMap;

pub struct RegionRanking {
    columns: ColumnNames,
    sales: SaleClassifier,
    limit: usize,
}

impl RegionRanking {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            columns: settings.columns.clone(),
            sales: SaleClassifier,
            limit: settings.top_n,
        }
    }
}

impl Aggregator for RegionRanking {
    type Output = Vec<RegionRank>;

    fn name(&self) -> &str {
        "regions"
    }

    fn scope(&self) -> FilterScope {
        FilterScope::Global
    }

    fn aggregate(&self, records: &[Record], filter: &FilterSpec) -> Vec<RegionRank> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut ranking: Vec<RegionRank> = Vec::new();

        for record in filter::apply(records, filter, self.scope(), &self.columns) {
            if !self.sales.is_valid_sale(&record.text(&self.columns.status)) {
                continue;
            }
            let region = or_placeholder(record.text(&self.columns.region), NO_REGION);
            let slot = *index.entry(region.clone()).or_insert_with(|| {
                ranking.push(RegionRank { region, customers: 0 });
                ranking.len() - 1
            });
            ranking[slot].customers += 1;
        }

        ranking.sort_by(|a, b| b.customers.cmp(&a.customers));
        ranking.truncate(self.limit);
        ranking
    }
}
