//! RiskQuantErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so callers can branch on a stable
/// code string instead of matching display text.
pub trait RiskQuantErrorCode {
    /// Returns the error code string (e.g., "MODEL_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const SAMPLING_ERROR: &str = "SAMPLING_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
