// Order-status breakdown over every filtered record.
use super::Aggregator;
use crate::classify::StatusClassifier;
use crate::config::{ColumnNames, DashboardSettings};
use crate::filter::{self, FilterScope};
use shared::models::{FilterSpec, Record, StatusCategory, StatusSlice};

pub struct StatusDistribution {
    columns: ColumnNames,
    classifier: StatusClassifier,
}

impl StatusDistribution {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            columns: settings.columns.clone(),
            classifier: StatusClassifier,
        }
    }
}

impl Aggregator for StatusDistribution {
    type Output = Vec<StatusSlice>;

    fn name(&self) -> &str {
        "status"
    }

    fn scope(&self) -> FilterScope {
        FilterScope::Global
    }

    fn aggregate(&self, records: &[Record], filter: &FilterSpec) -> Vec<StatusSlice> {
        let mut counts = vec![0usize; StatusCategory::ALL.len()];
        for record in filter::apply(records, filter, self.scope(), &self.columns) {
            let category = self.classifier.classify(&record.text(&self.columns.status));
            if let Some(i) = StatusCategory::ALL.iter().position(|c| *c == category) {
                counts[i] += 1;
            }
        }

        StatusCategory::ALL
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| StatusSlice {
                category: *category,
                label: category.label().to_string(),
                count,
            })
            .collect()
    }
}
