use crate::config::ColumnNames;
use crate::data::date_normalizer::normalize_date;
use crate::data::decode::decode_text;
use crate::data::tokenizer::{disambiguate_headers, split_line};
use crate::error::{EngineError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use shared::models::{FieldValue, Record};
use std::collections::HashMap;
use std::io::Cursor;

/// Input layout, chosen from the file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `;`-delimited text (`.csv`, `.txt`).
    Delimited,
    /// Workbook (`.xlsx`, `.xls`), first sheet only.
    Spreadsheet,
}

impl FileFormat {
    /// Case-sensitive suffix match; anything else is unsupported.
    pub fn detect(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".csv") || file_name.ends_with(".txt") {
            Some(FileFormat::Delimited)
        } else if file_name.ends_with(".xlsx") || file_name.ends_with(".xls") {
            Some(FileFormat::Spreadsheet)
        } else {
            None
        }
    }
}

pub struct SalesFileParser;

impl SalesFileParser {
    /// Parses a file's raw bytes. `Ok(None)` means the file type is not
    /// supported and was ignored.
    pub fn parse_bytes(file_name: &str, bytes: &[u8], columns: &ColumnNames) -> Result<Option<Vec<Record>>> {
        let records = match FileFormat::detect(file_name) {
            Some(FileFormat::Delimited) => {
                let (text, encoding) = decode_text(bytes);
                tracing::debug!(file = %file_name, ?encoding, "Decoded delimited export");
                Self::parse_delimited(&text, columns)
            }
            Some(FileFormat::Spreadsheet) => Self::parse_spreadsheet(file_name, bytes, columns)?,
            None => {
                tracing::debug!(file = %file_name, "Ignoring file with unsupported extension");
                return Ok(None);
            }
        };
        Ok(Some(records))
    }

    // Header: Fecha de venta;Estado;...;Estado;Comuna;Total (CLP);SKU;Título de la publicación;Unidades
    // Example Row: 01-01-23;Entregado;...;RM;Providencia;$1.000;SKU-1;"Polera; talla M";1
    pub fn parse_delimited(text: &str, columns: &ColumnNames) -> Vec<Record> {
        let mut lines = text.split('\n');
        let headers = match lines.next() {
            Some(line) => disambiguate_headers(split_line(line)),
            None => return Vec::new(),
        };

        lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let values = split_line(line).into_iter().map(FieldValue::Text);
                Self::build_record(&headers, values, columns)
            })
            .collect()
    }

    pub fn parse_spreadsheet(file_name: &str, bytes: &[u8], columns: &ColumnNames) -> Result<Vec<Record>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let first_sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| EngineError::EmptyWorkbook(file_name.to_string()))?;
        let range = workbook.worksheet_range(&first_sheet)?;
        tracing::debug!(file = %file_name, sheet = %first_sheet, rows = range.height(), "Read first worksheet");
        Ok(Self::records_from_range(&range, columns))
    }

    /// Turns a worksheet into records using its first row as headers.
    pub fn records_from_range(range: &Range<Data>, columns: &ColumnNames) -> Vec<Record> {
        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(row) => disambiguate_headers(row.iter().map(|cell| cell.to_string().trim().to_string())),
            None => return Vec::new(),
        };

        rows.filter(|row| !row.iter().all(is_blank))
            .map(|row| Self::build_record(&headers, row.iter().map(cell_value), columns))
            .collect()
    }

    // Pairs headers with values (missing trailing values become empty text,
    // extras are dropped) and resolves the sale date.
    fn build_record<I>(headers: &[String], values: I, columns: &ColumnNames) -> Record
    where
        I: Iterator<Item = FieldValue>,
    {
        let mut values = values;
        let mut fields: HashMap<String, FieldValue> = headers
            .iter()
            .map(|header| (header.clone(), values.next().unwrap_or_default()))
            .collect();

        let resolved = fields.get(&columns.sale_date).map(normalize_date);
        let sale_date = match resolved {
            Some((normalized, parsed)) => {
                fields.insert(columns.sale_date.clone(), normalized);
                parsed
            }
            None => None,
        };
        Record::with_sale_date(fields, sale_date)
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::String(s) => FieldValue::Text(s.trim().to_string()),
        Data::Float(f) => FieldValue::Number(*f),
        Data::Int(i) => FieldValue::Number(*i as f64),
        Data::Bool(b) => FieldValue::Text(b.to_string()),
        Data::DateTime(dt) if dt.is_duration() => FieldValue::Number(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => FieldValue::Date(datetime.date()),
            None => FieldValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => FieldValue::Text(String::new()),
    }
}
