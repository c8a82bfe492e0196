//! Error types for rule validation and rule file import.
//!
//! Matching and inversion never fail; these errors only come from the
//! editing and import paths.

/// A rule that cannot be saved as written.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Name is required")]
    EmptyName,
    #[error("Both patterns are required")]
    EmptyPattern,
    #[error("Both domains are required")]
    MissingDomain,
    #[error("Priority must be at least 1")]
    ZeroPriority,
    #[error("From pattern is not a valid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// A rule file that cannot be read or written.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid rule file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Rule file must contain an array of rule groups")]
    NotAnArray,
}
