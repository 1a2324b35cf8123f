//! # Messages
//!
//! User-facing copy for plate errors, keyed by [`PlateError`] kind.
//!
//! The form shows these strings under the plate field. The default catalog
//! is the Brazilian Portuguese copy the app ships with; an English catalog
//! exists for logs and tooling, and either can be patched field by field
//! with [`MessageOverrides`] (the CLI reads those from its config file).
//!
//! ```rust
//! use frota_core::{MessageCatalog, MessageOverrides, PlateError};
//!
//! let catalog = MessageCatalog::default().with_overrides(&MessageOverrides {
//!     empty: Some("Informe a placa".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(catalog.message_for(&PlateError::Empty), "Informe a placa");
//! assert_eq!(catalog.message_for(&PlateError::TooLong), "Placa muito longa");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PlateError;
use crate::types::PlateFormat;

// =============================================================================
// Locale
// =============================================================================

/// Languages with a built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt_br", alias = "pt")]
    PtBr,
    #[serde(rename = "en", alias = "en-US")]
    En,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::En => write!(f, "en"),
        }
    }
}

// =============================================================================
// Message Catalog
// =============================================================================

/// One string per plate error kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    pub empty: String,
    pub incomplete: String,
    pub too_long: String,
    pub unrecognized_format: String,
    pub old_grammar_mismatch: String,
    pub new_grammar_mismatch: String,
}

impl MessageCatalog {
    /// Brazilian Portuguese, the copy used by the app.
    pub fn pt_br() -> Self {
        MessageCatalog {
            empty: PlateError::Empty.to_string(),
            incomplete: PlateError::Incomplete.to_string(),
            too_long: PlateError::TooLong.to_string(),
            unrecognized_format: PlateError::UnrecognizedFormat.to_string(),
            old_grammar_mismatch: PlateError::GrammarMismatch {
                format: PlateFormat::Old,
            }
            .to_string(),
            new_grammar_mismatch: PlateError::GrammarMismatch {
                format: PlateFormat::New,
            }
            .to_string(),
        }
    }

    /// English copy.
    pub fn english() -> Self {
        MessageCatalog {
            empty: "plate is required".to_string(),
            incomplete: "incomplete plate".to_string(),
            too_long: "plate too long".to_string(),
            unrecognized_format: "invalid plate format".to_string(),
            old_grammar_mismatch: format!("use: {}", PlateFormat::Old.usage_hint()),
            new_grammar_mismatch: format!("use: {}", PlateFormat::New.usage_hint()),
        }
    }

    /// Built-in catalog for a locale.
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::PtBr => Self::pt_br(),
            Locale::En => Self::english(),
        }
    }

    /// Returns a copy with every `Some` override replacing its entry.
    pub fn with_overrides(mut self, overrides: &MessageOverrides) -> Self {
        let pairs = [
            (&mut self.empty, &overrides.empty),
            (&mut self.incomplete, &overrides.incomplete),
            (&mut self.too_long, &overrides.too_long),
            (&mut self.unrecognized_format, &overrides.unrecognized_format),
            (&mut self.old_grammar_mismatch, &overrides.old_grammar_mismatch),
            (&mut self.new_grammar_mismatch, &overrides.new_grammar_mismatch),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        self
    }

    /// Renders the message for an error kind.
    pub fn message_for(&self, error: &PlateError) -> String {
        match error {
            PlateError::Empty => self.empty.clone(),
            PlateError::Incomplete => self.incomplete.clone(),
            PlateError::TooLong => self.too_long.clone(),
            PlateError::UnrecognizedFormat => self.unrecognized_format.clone(),
            PlateError::GrammarMismatch {
                format: PlateFormat::Old,
            } => self.old_grammar_mismatch.clone(),
            PlateError::GrammarMismatch {
                format: PlateFormat::New,
            } => self.new_grammar_mismatch.clone(),
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        MessageCatalog::pt_br()
    }
}

// =============================================================================
// Overrides
// =============================================================================

/// Partial catalog; `None` keeps the locale's built-in copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_long: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrecognized_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_grammar_mismatch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_grammar_mismatch: Option<String>,
}

impl MessageOverrides {
    /// True when no entry is overridden.
    pub fn is_empty(&self) -> bool {
        *self == MessageOverrides::default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
