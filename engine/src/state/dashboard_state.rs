// Single owner of the loaded dataset and the three filter specs.
// Views are recomputed from immutable snapshots on every request; nothing here
// is updated incrementally.

use crate::analytics::{Aggregator, KpiAggregator, MonthlySeries, RegionRanking, StatusDistribution, TopProducts};
use crate::config::DashboardSettings;
use crate::data::{Dataset, SalesFileParser};
use crate::error::Result;
use shared::models::{
    DashboardView, FilterOptions, FilterSpec, KpiSummary, MonthlyPoint, ProductRank, ProductSortKey, RegionRank,
    StatusSlice,
};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DashboardState {
    settings: Arc<DashboardSettings>,
    dataset: Arc<Dataset>,
    global_filter: FilterSpec,
    monthly_filter: FilterSpec,
    top_products_filter: FilterSpec,
    product_sort: ProductSortKey,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DashboardSettings::default())
    }
}

impl DashboardState {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            dataset: Arc::new(Dataset::empty()),
            global_filter: FilterSpec::default(),
            monthly_filter: FilterSpec::default(),
            top_products_filter: FilterSpec::default(),
            product_sort: ProductSortKey::default(),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Current snapshot. Holding it keeps the records alive across reloads.
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    /// Replaces the dataset with the contents of `bytes`.
    ///
    /// Returns `Ok(false)` and leaves the state untouched when the file type is
    /// not supported. On error the previous dataset is kept as well.
    pub fn load_bytes(&mut self, file_name: &str, bytes: &[u8]) -> Result<bool> {
        let records = match SalesFileParser::parse_bytes(file_name, bytes, &self.settings.columns) {
            Ok(Some(records)) => records,
            Ok(None) => return Ok(false),
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Failed to parse upload, keeping previous dataset");
                return Err(e);
            }
        };

        tracing::info!(file = %file_name, records = records.len(), "Loaded sales dataset");
        self.dataset = Arc::new(Dataset::new(file_name, records));
        Ok(true)
    }

    /// Reads a file from disk and loads it. Only the read is asynchronous;
    /// parsing runs once the bytes are available.
    pub async fn load_path(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.load_bytes(&file_name, &bytes)
    }

    pub fn global_filter(&self) -> &FilterSpec {
        &self.global_filter
    }

    pub fn monthly_filter(&self) -> &FilterSpec {
        &self.monthly_filter
    }

    pub fn top_products_filter(&self) -> &FilterSpec {
        &self.top_products_filter
    }

    pub fn product_sort(&self) -> ProductSortKey {
        self.product_sort
    }

    pub fn set_global_filter(&mut self, filter: FilterSpec) {
        self.global_filter = filter;
    }

    pub fn reset_global_filter(&mut self) {
        self.global_filter = FilterSpec::default();
    }

    /// The monthly chart has no region selector; a region on `filter` is dropped.
    pub fn set_monthly_filter(&mut self, filter: FilterSpec) {
        self.monthly_filter = filter.with_region(None);
    }

    pub fn set_top_products_filter(&mut self, filter: FilterSpec) {
        self.top_products_filter = filter.with_region(None);
    }

    pub fn set_product_sort(&mut self, sort_key: ProductSortKey) {
        self.product_sort = sort_key;
    }

    fn run<A: Aggregator>(&self, aggregator: A, filter: &FilterSpec) -> A::Output {
        tracing::trace!(view = aggregator.name(), scope = ?aggregator.scope(), "Aggregating");
        aggregator.aggregate(self.dataset.records(), filter)
    }

    pub fn kpis(&self) -> KpiSummary {
        self.run(KpiAggregator::new(&self.settings), &self.global_filter)
    }

    pub fn monthly_series(&self) -> Vec<MonthlyPoint> {
        self.run(MonthlySeries::new(&self.settings), &self.monthly_filter)
    }

    pub fn top_products(&self) -> Vec<ProductRank> {
        self.run(TopProducts::new(&self.settings, self.product_sort), &self.top_products_filter)
    }

    pub fn regions(&self) -> Vec<RegionRank> {
        self.run(RegionRanking::new(&self.settings), &self.global_filter)
    }

    pub fn status_distribution(&self) -> Vec<StatusSlice> {
        self.run(StatusDistribution::new(&self.settings), &self.global_filter)
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.dataset.filter_options(&self.settings.columns)
    }

    pub fn view(&self) -> DashboardView {
        let view = DashboardView {
            kpis: self.kpis(),
            monthly: self.monthly_series(),
            top_products: self.top_products(),
            regions: self.regions(),
            status: self.status_distribution(),
            filter_options: self.filter_options(),
        };
        tracing::debug!(
            source = %self.dataset.source(),
            records = self.dataset.len(),
            valid_sales = view.kpis.valid_sales,
            "Computed dashboard view"
        );
        view
    }
}
