// Resolves every supported sale-date representation to `DD-MM-YY`.
use chrono::{Duration, NaiveDate};
use shared::models::{CanonicalDate, FieldValue};

/// A sale date as found in a record, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate<'a> {
    /// Date-typed spreadsheet cell.
    Native(NaiveDate),
    /// Spreadsheet serial day number.
    Serial(f64),
    /// `YYYY-MM-DD` text, possibly followed by a time.
    IsoText { year: i32, month: u32, day: u32 },
    /// Anything else; assumed to already be `DD-MM-YY`.
    OpaqueText(&'a str),
}

impl<'a> RawDate<'a> {
    /// Classifies a field value. Empty values have no date at all.
    pub fn classify(value: &'a FieldValue) -> Option<Self> {
        match value {
            FieldValue::Date(date) => Some(RawDate::Native(*date)),
            FieldValue::Number(serial) => Some(RawDate::Serial(*serial)),
            FieldValue::Text(text) if text.trim().is_empty() => None,
            FieldValue::Text(text) => Some(parse_iso_prefix(text).unwrap_or(RawDate::OpaqueText(text))),
        }
    }

    /// The normalized field value. Representations that cannot be converted are
    /// returned as they were.
    pub fn normalize(&self) -> FieldValue {
        match self {
            RawDate::Native(date) => FieldValue::Text(CanonicalDate::from_naive(*date).to_string()),
            RawDate::Serial(serial) => match serial_to_date(*serial) {
                Some(date) => FieldValue::Text(CanonicalDate::from_naive(date).to_string()),
                None => FieldValue::Number(*serial),
            },
            RawDate::IsoText { year, month, day } => FieldValue::Text(
                CanonicalDate {
                    day: *day,
                    month: *month,
                    year: year.rem_euclid(100) as u32,
                }
                .to_string(),
            ),
            RawDate::OpaqueText(text) => FieldValue::Text(text.to_string()),
        }
    }
}

/// Normalizes a date field, returning the new value and its parsed form.
pub fn normalize_date(value: &FieldValue) -> (FieldValue, Option<CanonicalDate>) {
    match RawDate::classify(value) {
        Some(raw) => {
            let normalized = raw.normalize();
            let parsed = match &normalized {
                FieldValue::Text(text) => CanonicalDate::parse(text),
                _ => None,
            };
            (normalized, parsed)
        }
        None => (value.clone(), None),
    }
}

fn parse_iso_prefix(text: &str) -> Option<RawDate<'_>> {
    let s = text.trim();
    let bytes = s.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let all_digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !all_digits(0..4) || !all_digits(5..7) || !all_digits(8..10) {
        return None;
    }
    Some(RawDate::IsoText {
        year: s[0..4].parse().ok()?,
        month: s[5..7].parse().ok()?,
        day: s[8..10].parse().ok()?,
    })
}

/// Converts a spreadsheet serial (1900 date system) to a calendar date.
///
/// Serial 1 is 1900-01-01. The system counts a 29 February 1900 at serial 60;
/// that day maps to 1900-02-28. The fractional time of day is ignored.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let (base, offset) = if days < 60 {
        (NaiveDate::from_ymd_opt(1899, 12, 31)?, days)
    } else if days == 60 {
        (NaiveDate::from_ymd_opt(1900, 2, 28)?, 0)
    } else {
        (NaiveDate::from_ymd_opt(1899, 12, 30)?, days)
    };
    base.checked_add_signed(Duration::days(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: FieldValue) -> String {
        value.as_text().into_owned()
    }

    #[test]
    fn test_native_date_is_formatted() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let (value, parsed) = normalize_date(&FieldValue::Date(date));
        assert_eq!(text(value), "05-03-24");
        assert_eq!(parsed.unwrap().full_year(), 2024);
    }

    #[test]
    fn test_iso_text_with_time_is_reordered() {
        let (value, _) = normalize_date(&FieldValue::from("2024-03-05T00:00:00"));
        assert_eq!(text(value), "05-03-24");
    }

    #[test]
    fn test_canonical_text_is_unchanged() {
        let (value, parsed) = normalize_date(&FieldValue::from("05-03-24"));
        assert_eq!(text(value), "05-03-24");
        assert_eq!(parsed.unwrap().month, 3);
    }

    #[test]
    fn test_unknown_text_passes_through() {
        let (value, parsed) = normalize_date(&FieldValue::from("5 de marzo"));
        assert_eq!(text(value), "5 de marzo");
        assert!(parsed.is_none());
    }

    #[test]
    fn test_empty_value_has_no_date() {
        let (value, parsed) = normalize_date(&FieldValue::from(""));
        assert_eq!(value, FieldValue::from(""));
        assert!(parsed.is_none());
    }

    #[test]
    fn test_serial_numbers() {
        assert_eq!(serial_to_date(1.0), NaiveDate::from_ymd_opt(1900, 1, 1));
        assert_eq!(serial_to_date(59.0), NaiveDate::from_ymd_opt(1900, 2, 28));
        assert_eq!(serial_to_date(61.0), NaiveDate::from_ymd_opt(1900, 3, 1));
        assert_eq!(serial_to_date(45000.0), NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(serial_to_date(45000.75), NaiveDate::from_ymd_opt(2023, 3, 15));
    }

    #[test]
    fn test_serial_value_is_normalized() {
        let (value, parsed) = normalize_date(&FieldValue::Number(45000.0));
        assert_eq!(text(value), "15-03-23");
        assert_eq!(parsed.unwrap().full_year(), 2023);
    }

    #[test]
    fn test_invalid_serial_is_kept() {
        let (value, parsed) = normalize_date(&FieldValue::Number(-3.0));
        assert_eq!(value, FieldValue::Number(-3.0));
        assert!(parsed.is_none());
    }

    #[test]
    fn test_classify_variants() {
        let iso = FieldValue::from("2023-08-31");
        assert_eq!(
            RawDate::classify(&iso),
            Some(RawDate::IsoText { year: 2023, month: 8, day: 31 })
        );
        let opaque = FieldValue::from("31-08-23");
        assert_eq!(RawDate::classify(&opaque), Some(RawDate::OpaqueText("31-08-23")));
    }
}
