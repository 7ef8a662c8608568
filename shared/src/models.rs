use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A single cell value as it came out of the source file.
///
/// Delimited text only ever produces `Text`; spreadsheets may also carry
/// numbers and typed dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    /// Textual form of the value. Integral numbers print without a fraction.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    Cow::Owned(format!("{}", *n as i64))
                } else {
                    Cow::Owned(n.to_string())
                }
            }
            FieldValue::Date(d) => Cow::Owned(CanonicalDate::from_naive(*d).to_string()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// `DD-MM-YY` sale date. The year keeps the two digits it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalDate {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

impl CanonicalDate {
    pub fn from_naive(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year().rem_euclid(100) as u32,
        }
    }

    /// Parses `DD-MM-YY`. Any three dash-separated integers are accepted.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split('-');
        let day = parts.next()?.trim().parse().ok()?;
        let month = parts.next()?.trim().parse().ok()?;
        let year = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { day, month, year })
    }

    /// Two-digit years live in the 2000s; wider years are taken literally.
    pub fn full_year(&self) -> i32 {
        if self.year < 100 {
            2000 + self.year as i32
        } else {
            self.year as i32
        }
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:02}", self.day, self.month, self.year)
    }
}

/// One order row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
    sale_date: Option<CanonicalDate>,
}

impl Record {
    pub fn new(fields: HashMap<String, FieldValue>) -> Self {
        Self {
            fields,
            sale_date: None,
        }
    }

    /// Builds a record whose sale date has already been resolved.
    pub fn with_sale_date(fields: HashMap<String, FieldValue>, sale_date: Option<CanonicalDate>) -> Self {
        Self { fields, sale_date }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Text of a column, empty when the column is missing.
    pub fn text(&self, column: &str) -> Cow<'_, str> {
        self.fields
            .get(column)
            .map(FieldValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn sale_date(&self) -> Option<CanonicalDate> {
        self.sale_date
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Inclusive year/month window plus an optional region constraint.
///
/// Years are four-digit calendar years; months run 1..=12.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub month_from: Option<u32>,
    pub month_to: Option<u32>,
    pub region: Option<String>,
}

impl FilterSpec {
    pub fn has_date_bounds(&self) -> bool {
        self.year_from.is_some()
            || self.year_to.is_some()
            || self.month_from.is_some()
            || self.month_to.is_some()
    }

    /// Sets the lower year bound, dropping an upper bound that would now be
    /// below it.
    pub fn with_year_from(mut self, year: Option<i32>) -> Self {
        if let (Some(from), Some(to)) = (year, self.year_to) {
            if to < from {
                self.year_to = None;
            }
        }
        self.year_from = year;
        self
    }

    pub fn with_year_to(mut self, year: Option<i32>) -> Self {
        self.year_to = year;
        self
    }

    pub fn with_months(mut self, from: Option<u32>, to: Option<u32>) -> Self {
        self.month_from = from;
        self.month_to = to;
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region.filter(|r| !r.is_empty());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusCategory {
    Delivered,
    Cancelled,
    ReturnedOrNotDelivered,
    Delayed,
    AwaitingAgreement,
    Other,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 6] = [
        StatusCategory::Delivered,
        StatusCategory::Cancelled,
        StatusCategory::ReturnedOrNotDelivered,
        StatusCategory::Delayed,
        StatusCategory::AwaitingAgreement,
        StatusCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Delivered => "Entregado",
            StatusCategory::Cancelled => "Canceladas",
            StatusCategory::ReturnedOrNotDelivered => "Devueltas/No entregadas",
            StatusCategory::Delayed => "Demorados",
            StatusCategory::AwaitingAgreement => "Acordar Entrega",
            StatusCategory::Other => "Otros",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSortKey {
    #[default]
    Revenue,
    Units,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub valid_sales: usize,
    pub cancelled: usize,
    pub problematic: usize,
    pub distinct_regions: usize,
    pub distinct_sub_regions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// `YYYY-MM`, used for ordering.
    pub sort_key: String,
    /// `MM/YYYY`, used for display.
    pub label: String,
    pub orders: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRank {
    pub sku: String,
    pub title: String,
    pub full_title: String,
    pub units: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRank {
    pub region: String,
    pub customers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSlice {
    pub category: StatusCategory,
    pub label: String,
    pub count: usize,
}

/// Values available for the filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub regions: Vec<String>,
}

/// Everything the presentation layer renders, computed in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub kpis: KpiSummary,
    pub monthly: Vec<MonthlyPoint>,
    pub top_products: Vec<ProductRank>,
    pub regions: Vec<RegionRank>,
    pub status: Vec<StatusSlice>,
    pub filter_options: FilterOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_date_parses_and_prints() {
        let date = CanonicalDate::parse("05-03-24").unwrap();
        assert_eq!(date, CanonicalDate { day: 5, month: 3, year: 24 });
        assert_eq!(date.full_year(), 2024);
        assert_eq!(date.to_string(), "05-03-24");
    }

    #[test]
    fn canonical_date_rejects_other_shapes() {
        assert!(CanonicalDate::parse("2024/03/05").is_none());
        assert!(CanonicalDate::parse("05-03").is_none());
        assert!(CanonicalDate::parse("05-03-24-1").is_none());
        assert!(CanonicalDate::parse("").is_none());
    }

    #[test]
    fn four_digit_years_are_kept() {
        let date = CanonicalDate::parse("05-03-2024").unwrap();
        assert_eq!(date.full_year(), 2024);
    }

    #[test]
    fn number_text_drops_integral_fraction() {
        assert_eq!(FieldValue::Number(1000.0).as_text(), "1000");
        assert_eq!(FieldValue::Number(12.5).as_text(), "12.5");
    }

    #[test]
    fn date_value_prints_canonical() {
        let value = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(value.as_text(), "05-03-24");
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let record = Record::default();
        assert_eq!(record.text("Estado"), "");
        assert!(record.sale_date().is_none());
    }

    #[test]
    fn raising_year_from_clears_stale_year_to() {
        let spec = FilterSpec::default().with_year_to(Some(2022)).with_year_from(Some(2023));
        assert_eq!(spec.year_from, Some(2023));
        assert_eq!(spec.year_to, None);

        let kept = FilterSpec::default().with_year_to(Some(2024)).with_year_from(Some(2023));
        assert_eq!(kept.year_to, Some(2024));
    }

    #[test]
    fn blank_region_means_no_constraint() {
        let spec = FilterSpec::default().with_region(Some(String::new()));
        assert!(spec.region.is_none());
        assert!(!spec.has_date_bounds());
    }

    #[test]
    fn filter_spec_reads_camel_case_json() {
        let spec: FilterSpec = serde_json::from_str(r#"{"yearFrom":2023,"monthTo":6}"#).unwrap();
        assert_eq!(spec.year_from, Some(2023));
        assert_eq!(spec.month_to, Some(6));
        assert!(spec.region.is_none());
    }
}
