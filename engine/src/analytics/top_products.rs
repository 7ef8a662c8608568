// Best-selling products by revenue or units.
use super::{or_placeholder, Aggregator, NO_SKU, NO_TITLE};
use crate::classify::SaleClassifier;
use crate::config::{ColumnNames, DashboardSettings};
use crate::filter::{self, FilterScope};
use shared::models::{FilterSpec, ProductRank, ProductSortKey, Record};
use shared::utils::chilean_format::{amount_of, units_of};
use std::collections::HashMap;

pub struct TopProducts {
    columns: ColumnNames,
    sales: SaleClassifier,
    sort_key: ProductSortKey,
    limit: usize,
    title_len: usize,
}

impl TopProducts {
    pub fn new(settings: &DashboardSettings, sort_key: ProductSortKey) -> Self {
        Self {
            columns: settings.columns.clone(),
            sales: SaleClassifier,
            sort_key,
            limit: settings.top_n,
            title_len: settings.title_display_len,
        }
    }

    fn title_of(&self, record: &Record) -> String {
        let title = record.text(&self.columns.title);
        if !title.trim().is_empty() {
            return title.into_owned();
        }
        or_placeholder(record.text(&self.columns.title_fallback), NO_TITLE)
    }
}

impl Aggregator for TopProducts {
    type Output = Vec<ProductRank>;

    fn name(&self) -> &str {
        "top_products"
    }

    fn scope(&self) -> FilterScope {
        FilterScope::Windowed
    }

    fn aggregate(&self, records: &[Record], filter: &FilterSpec) -> Vec<ProductRank> {
        // Insertion order is kept so equal totals rank by first appearance.
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut products: Vec<ProductRank> = Vec::new();

        for record in filter::apply(records, filter, self.scope(), &self.columns) {
            if !self.sales.is_valid_sale(&record.text(&self.columns.status)) {
                continue;
            }

            let sku = or_placeholder(record.text(&self.columns.sku), NO_SKU);
            let slot = *index.entry(sku.clone()).or_insert_with(|| {
                let full_title = self.title_of(record);
                products.push(ProductRank {
                    sku,
                    title: full_title.chars().take(self.title_len).collect(),
                    full_title,
                    units: 0,
                    revenue: 0.0,
                });
                products.len() - 1
            });

            let product = &mut products[slot];
            product.units += units_of(record.get(&self.columns.units));
            product.revenue += amount_of(record.get(&self.columns.amount));
        }

        match self.sort_key {
            ProductSortKey::Revenue => products.sort_by(|a, b| b.revenue.total_cmp(&a.revenue)),
            ProductSortKey::Units => products.sort_by(|a, b| b.units.cmp(&a.units)),
        }
        products.truncate(self.limit);
        products
    }
}
