// Date-window and region filtering of records.
use crate::config::ColumnNames;
use shared::models::{FilterSpec, Record};

/// Which view a filter spec belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Dashboard-wide filter. Honours `region`; undated records are only
    /// excluded when a date bound is active.
    Global,
    /// Per-chart date window. Undated records never match.
    Windowed,
}

/// Tests `record` against `spec`. `columns` names the sale date field and the
/// region field compared with `spec.region` in the global scope.
///
/// A record is undated when its date field is missing or blank. Date text
/// that is present but not `DD-MM-YY` cannot be compared, so it violates no
/// bound.
pub fn matches(record: &Record, spec: &FilterSpec, scope: FilterScope, columns: &ColumnNames) -> bool {
    if scope == FilterScope::Global {
        if let Some(region) = spec.region.as_deref() {
            if record.text(&columns.region) != region {
                return false;
            }
        }
    }

    let undated = record.get(&columns.sale_date).map_or(true, |value| value.is_empty());
    if undated {
        return scope == FilterScope::Global && !spec.has_date_bounds();
    }

    let Some(date) = record.sale_date() else {
        return true;
    };

    let year = date.full_year();
    if spec.year_from.is_some_and(|from| year < from) {
        return false;
    }
    if spec.year_to.is_some_and(|to| year > to) {
        return false;
    }
    if spec.month_from.is_some_and(|from| date.month < from) {
        return false;
    }
    if spec.month_to.is_some_and(|to| date.month > to) {
        return false;
    }
    true
}

/// Records of `records` matching `spec`, in their original order.
pub fn apply<'a>(
    records: &'a [Record],
    spec: &'a FilterSpec,
    scope: FilterScope,
    columns: &'a ColumnNames,
) -> impl Iterator<Item = &'a Record> + 'a {
    records
        .iter()
        .filter(move |record| matches(record, spec, scope, columns))
}
