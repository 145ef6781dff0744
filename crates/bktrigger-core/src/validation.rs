//! Input checks for configuration values.

/// Outcome of validating a single input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok,
    /// Usable, but probably not what the user meant.
    Warning(String),
    /// Not usable.
    Error(String),
}

impl Validation {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Check that a required field is non-blank.
///
/// `field` is the human name, e.g. "Organization".
pub fn validate_required(field: &str, value: &str) -> Validation {
    if value.trim().is_empty() {
        Validation::Error(format!("{} is required", field))
    } else {
        Validation::Ok
    }
}

/// Check an API base URL.
pub fn validate_base_url(url: &str) -> Validation {
    if url.trim().is_empty() {
        return Validation::Error("Base URL cannot be empty".to_string());
    }
    if !url.starts_with("http") {
        return Validation::Warning("URL should start with http or https".to_string());
    }
    Validation::Ok
}
