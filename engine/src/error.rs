use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Spreadsheet error: {source}")]
    SpreadsheetError {
        #[from]
        source: calamine::Error,
    },

    #[error("Workbook '{0}' has no sheets")]
    EmptyWorkbook(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Export error: {source}")]
    ExportError {
        #[from]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open_missing() -> Result<Vec<u8>> {
            Ok(std::fs::read("/definitely/not/here.csv")?)
        }
        let err = open_missing().unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn empty_workbook_message_names_the_file() {
        let err = EngineError::EmptyWorkbook("ventas.xlsx".to_string());
        assert_eq!(err.to_string(), "Workbook 'ventas.xlsx' has no sheets");
    }
}
