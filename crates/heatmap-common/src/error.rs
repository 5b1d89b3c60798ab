//! Error types for the temperature heat map crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for loading and rendering a heat map.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Input Errors ===
    #[error("Failed to decode dataset: {0}")]
    DecodeError(String),

    #[error("Invalid month {month} for year {year} (record #{index})")]
    InvalidMonth { index: usize, year: i32, month: u32 },

    #[error("Non-finite variance for {year}-{month:02} (record #{index})")]
    InvalidVariance { index: usize, year: i32, month: u32 },

    #[error("Non-finite base temperature: {0}")]
    InvalidBaseTemperature(f64),

    // === Fetch Errors ===
    #[error("Failed to fetch dataset from {url}: {message}")]
    FetchError { url: String, message: String },

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),
}

impl HeatmapError {
    /// Whether the error originates from the dataset itself rather than the
    /// transport or the renderer.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::DecodeError(_)
                | HeatmapError::InvalidMonth { .. }
                | HeatmapError::InvalidVariance { .. }
                | HeatmapError::InvalidBaseTemperature(_)
        )
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::DecodeError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(HeatmapError::DecodeError("x".into()).is_input_error());
        assert!(HeatmapError::InvalidMonth { index: 0, year: 1900, month: 13 }.is_input_error());
        assert!(!HeatmapError::RenderError("x".into()).is_input_error());
        assert!(!HeatmapError::FetchError {
            url: "http://localhost".into(),
            message: "refused".into()
        }
        .is_input_error());
    }

    #[test]
    fn test_display_includes_context() {
        let err = HeatmapError::InvalidVariance { index: 3, year: 1901, month: 2 };
        assert_eq!(err.to_string(), "Non-finite variance for 1901-02 (record #3)");
    }
}
