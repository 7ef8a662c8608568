// Monthly orders and revenue
use super::Aggregator;
use crate::classify::SaleClassifier;
use crate::config::{ColumnNames, DashboardSettings};
use crate::filter::{self, FilterScope};
use shared::models::{FilterSpec, MonthlyPoint, Record};
use shared::utils::chilean_format::amount_of;
use std::collections::BTreeMap;

pub struct MonthlySeries {
    columns: ColumnNames,
    sales: SaleClassifier,
}

impl MonthlySeries {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            columns: settings.columns.clone(),
            sales: SaleClassifier,
        }
    }
}

impl Aggregator for MonthlySeries {
    type Output = Vec<MonthlyPoint>;

    fn name(&self) -> &str {
        "monthly"
    }

    fn scope(&self) -> FilterScope {
        FilterScope::Windowed
    }

    fn aggregate(&self, records: &[Record], filter: &FilterSpec) -> Vec<MonthlyPoint> {
        let mut months: BTreeMap<String, MonthlyPoint> = BTreeMap::new();

        for record in filter::apply(records, filter, self.scope(), &self.columns) {
            if !self.sales.is_valid_sale(&record.text(&self.columns.status)) {
                continue;
            }
            let Some(date) = record.sale_date() else {
                continue;
            };

            let year = date.full_year();
            let sort_key = format!("{}-{:02}", year, date.month);
            let point = months.entry(sort_key.clone()).or_insert_with(|| MonthlyPoint {
                sort_key,
                label: format!("{:02}/{}", date.month, year),
                orders: 0,
                revenue: 0.0,
            });
            point.orders += 1;
            point.revenue += amount_of(record.get(&self.columns.amount));
        }

        months.into_values().collect()
    }
}
