// Locale helpers shared by the engine and any front end.

/// Chilean peso amounts as they appear in marketplace exports
/// (`$1.234.567`, `1234567`, `-$500`).
pub mod chilean_format {
    use crate::models::FieldValue;

    /// Keeps only the digits of an amount. A `-` ahead of the first digit makes
    /// it negative. Anything without digits is zero.
    pub fn parse_amount(s: &str) -> f64 {
        let mut negative = false;
        let mut digits = String::with_capacity(s.len());
        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c == '-' && digits.is_empty() {
                negative = true;
            }
        }
        let value = digits.parse::<f64>().unwrap_or(0.0);
        if negative {
            -value
        } else {
            value
        }
    }

    pub fn amount_of(value: Option<&FieldValue>) -> f64 {
        match value {
            Some(FieldValue::Number(n)) if n.is_finite() => *n,
            Some(FieldValue::Text(s)) => parse_amount(s),
            _ => 0.0,
        }
    }

    /// Leading integer of a unit count (`"3"`, `"3 u."`); zero otherwise.
    pub fn parse_units(s: &str) -> i64 {
        let trimmed = s.trim();
        let end = trimmed
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        trimmed[..end].parse().unwrap_or(0)
    }

    pub fn units_of(value: Option<&FieldValue>) -> i64 {
        match value {
            Some(FieldValue::Number(n)) if n.is_finite() => n.trunc() as i64,
            Some(FieldValue::Text(s)) => parse_units(s),
            _ => 0,
        }
    }

    /// Formats as es-CL pesos: `$` prefix, `.` thousands, no decimals.
    pub fn format_clp(value: f64) -> String {
        if !value.is_finite() {
            return "$0".to_string();
        }
        let rounded = value.round();
        let negative = rounded < 0.0;
        let digits = format!("{}", rounded.abs() as u64);

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if negative {
            format!("-${}", grouped)
        } else {
            format!("${}", grouped)
        }
    }

}
