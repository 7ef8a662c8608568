// Keyword-based classification of free-text order statuses.
pub mod sale;
pub mod status;

pub use sale::SaleClassifier;
pub use status::StatusClassifier;

/// A single test against a lower-cased, trimmed status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordRule {
    Exact(&'static str),
    Contains(&'static str),
}

impl KeywordRule {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            KeywordRule::Exact(keyword) => lowered == *keyword,
            KeywordRule::Contains(keyword) => lowered.contains(keyword),
        }
    }
}

/// Lower-cases and trims status text once so rules can be tested cheaply.
pub fn normalize_status(status: &str) -> String {
    status.trim().to_lowercase()
}

pub fn any_matches(rules: &[KeywordRule], lowered: &str) -> bool {
    rules.iter().any(|rule| rule.matches(lowered))
}
