// Ingestion: decoding, tokenizing, parsing and date normalization.
pub mod dataset;
pub mod date_normalizer;
pub mod decode;
pub mod record_parser;
pub mod tokenizer;

pub use dataset::Dataset;
pub use record_parser::{FileFormat, SalesFileParser};
