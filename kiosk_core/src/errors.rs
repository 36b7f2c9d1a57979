//! # Error Types
//!
//! Structured error types for kiosk_core. Every error is local to one call:
//! nothing here is fatal to the process and nothing is retried, since all
//! calculations are deterministic.
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::errors::{KioskError, KioskResult};
//!
//! fn validate_radius(radius_mm: f64) -> KioskResult<()> {
//!     if radius_mm <= 0.0 {
//!         return Err(KioskError::invalid_parameter(
//!             "radius_mm",
//!             radius_mm.to_string(),
//!             "Radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for kiosk_core operations
pub type KioskResult<T> = Result<T, KioskError>;

/// Structured error type for design operations.
///
/// `SafetyLimitExceeded` is warning-level: the derivation functions still
/// return their values and the caller decides what to do with them.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum KioskError {
    /// A primary input violates its domain (negative radius, unknown material...)
    #[error("Invalid parameter '{field}': {value} - {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// Preset name not in the compiled-in catalog
    #[error("Unknown preset: '{name}'")]
    UnknownPreset { name: String },

    /// Retrofit material or count outside its allowed set/range
    #[error("Invalid selection for retrofit '{retrofit}': {reason}")]
    InvalidSelection { retrofit: String, reason: String },

    /// A derived or input value is outside a hard safety bound
    #[error("Safety limit exceeded: {limit} = {value} (bound {bound})")]
    SafetyLimitExceeded {
        limit: String,
        value: String,
        bound: String,
    },

    /// A geometry generator could not produce a plan
    #[error("Generation failed: {generator} - {reason}")]
    GenerationFailed { generator: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl KioskError {
    /// Create an InvalidParameter error
    pub fn invalid_parameter(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        KioskError::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownPreset error
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        KioskError::UnknownPreset { name: name.into() }
    }

    /// Create an InvalidSelection error
    pub fn invalid_selection(retrofit: impl Into<String>, reason: impl Into<String>) -> Self {
        KioskError::InvalidSelection {
            retrofit: retrofit.into(),
            reason: reason.into(),
        }
    }

    /// Create a SafetyLimitExceeded warning
    pub fn safety_limit(limit: impl Into<String>, value: impl Into<String>, bound: impl Into<String>) -> Self {
        KioskError::SafetyLimitExceeded {
            limit: limit.into(),
            value: value.into(),
            bound: bound.into(),
        }
    }

    /// Create a GenerationFailed error
    pub fn generation_failed(generator: impl Into<String>, reason: impl Into<String>) -> Self {
        KioskError::GenerationFailed {
            generator: generator.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        KioskError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        KioskError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KioskError::FileLocked { .. })
    }

    /// Warning-level results that carry inspectable values rather than a rejection
    pub fn is_warning(&self) -> bool {
        matches!(self, KioskError::SafetyLimitExceeded { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            KioskError::InvalidParameter { .. } => "INVALID_PARAMETER",
            KioskError::UnknownPreset { .. } => "UNKNOWN_PRESET",
            KioskError::InvalidSelection { .. } => "INVALID_SELECTION",
            KioskError::SafetyLimitExceeded { .. } => "SAFETY_LIMIT_EXCEEDED",
            KioskError::GenerationFailed { .. } => "GENERATION_FAILED",
            KioskError::FileError { .. } => "FILE_ERROR",
            KioskError::FileLocked { .. } => "FILE_LOCKED",
            KioskError::SerializationError { .. } => "SERIALIZATION_ERROR",
            KioskError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
