// Dashboard settings, loaded from a JSON file or taken from defaults.
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::path::Path;

/// Header names of the columns the dashboard reads.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub sale_date: String,
    pub status: String,
    pub region: String,
    pub sub_region: String,
    pub amount: String,
    pub sku: String,
    pub title: String,
    /// Title header as it reads when a Latin-1 export was decoded as UTF-8.
    pub title_fallback: String,
    pub units: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            sale_date: "Fecha de venta".to_string(),
            status: "Estado".to_string(),
            region: "Estado.1".to_string(),
            sub_region: "Comuna".to_string(),
            amount: "Total (CLP)".to_string(),
            sku: "SKU".to_string(),
            title: "Título de la publicación".to_string(),
            title_fallback: "TÃ­tulo de la publicaciÃ³n".to_string(),
            units: "Unidades".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardSettings {
    pub columns: ColumnNames,
    /// Characters of a product title shown in rankings.
    pub title_display_len: usize,
    /// Rows kept by the product and region rankings.
    pub top_n: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            columns: ColumnNames::default(),
            title_display_len: 35,
            top_n: 10,
        }
    }
}

impl DashboardSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: DashboardSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "Loaded dashboard settings");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(EngineError::ConfigError("top_n must be greater than 0".to_string()));
        }
        if self.columns.sale_date.trim().is_empty() {
            return Err(EngineError::ConfigError("columns.sale_date cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_marketplace_export() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.columns.sale_date, "Fecha de venta");
        assert_eq!(settings.columns.region, "Estado.1");
        assert_eq!(settings.title_display_len, 35);
        assert_eq!(settings.top_n, 10);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let settings = DashboardSettings::from_json_str(r#"{"top_n": 5, "columns": {"region": "Región"}}"#).unwrap();
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.columns.region, "Región");
        assert_eq!(settings.columns.status, "Estado");
        assert_eq!(settings.title_display_len, 35);
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let err = DashboardSettings::from_json_str(r#"{"top_n": 0}"#).unwrap_err();
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = DashboardSettings::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, EngineError::JsonError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"title_display_len": 20}}"#).unwrap();
        let settings = DashboardSettings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.title_display_len, 20);
    }
}
