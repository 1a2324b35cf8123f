//! # Error Types
//!
//! Domain-specific error types for frota-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  frota-core errors (this file)                                         │
//! │  ├── PlateError       - Why a plate string is not a valid plate        │
//! │  ├── ValidationError  - Vehicle form field failures                    │
//! │  └── CoreError        - Lookups and anything wrapping the above        │
//! │                                                                         │
//! │  frota-cli errors (separate crate)                                     │
//! │  └── CliError         - Config, file and output failures               │
//! │                                                                         │
//! │  Flow: PlateError → ValidationError::InvalidPlate → CoreError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, limits, etc.)
//! 3. Errors are enum variants, never String
//! 4. Plate errors are returned as data inside [`PlateValidation`], not thrown
//!
//! [`PlateValidation`]: crate::types::PlateValidation

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::types::PlateFormat;

// =============================================================================
// Plate Error
// =============================================================================

/// Reasons a plate string fails validation.
///
/// The `Display` text is the default Brazilian Portuguese copy. Callers that
/// need other wording render through a [`MessageCatalog`] instead.
///
/// ## Classification by normalized length
/// ```text
///   0        1..=6        7                          8..
///   │          │          │                           │
///   Empty   Incomplete    ├─ matches no grammar ──►   TooLong
///                         │  UnrecognizedFormat
///                         └─ detected but re-check fails ──►
///                            GrammarMismatch (logic bug)
/// ```
///
/// [`MessageCatalog`]: crate::messages::MessageCatalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlateError {
    /// Input normalizes to nothing.
    #[error("Placa é obrigatória")]
    Empty,

    /// Between 1 and 6 plate characters.
    #[error("Placa incompleta")]
    Incomplete,

    /// More than 7 plate characters.
    #[error("Placa muito longa")]
    TooLong,

    /// Exactly 7 characters but neither `LLLDDDD` nor `LLLDLDD`.
    #[error("Formato de placa inválido")]
    UnrecognizedFormat,

    /// The detected format failed its own full-grammar check.
    ///
    /// Detection and the final check use the same grammars, so this should
    /// never be produced for real input. It is still reported as invalid.
    #[error("Formato inválido. Use: {}", .format.usage_hint())]
    GrammarMismatch { format: PlateFormat },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Vehicle form validation errors.
///
/// These errors occur when a draft typed into the form doesn't meet
/// requirements. Used before the record is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, unsupported URI scheme).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The plate field failed the plate grammar.
    ///
    /// `reason` is the rendered catalog message shown under the field.
    #[error("plate is invalid: {reason}")]
    InvalidPlate { error: PlateError, reason: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No vehicle matches the id or plate that was looked up.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// Plate error (wraps PlateError).
    #[error("Plate error: {0}")]
    Plate(#[from] PlateError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
