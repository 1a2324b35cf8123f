//! # Domain Types
//!
//! Core domain types used throughout Frota.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PlateFormat    │   │ PlateValidation │   │    Vehicle      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Old  ABC-1234  │   │  is_valid       │   │  id (UUID)      │       │
//! │  │  New  BRA2E19   │   │  format         │   │  plate          │       │
//! │  └─────────────────┘   │  formatted      │   │  brand / model  │       │
//! │                        │  error          │   │  year / color   │       │
//! │                        │  error_message  │   │  photo_uri      │       │
//! │                        └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ built from     │
//! │                                              ┌────────┴────────┐       │
//! │                                              │  VehicleDraft   │       │
//! │                                              │  (form payload) │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every vehicle has:
//! - `id`: UUID v4 - immutable, used by the backend
//! - `plate`: business identifier, stored in its masked display form

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreResult, PlateError};
use crate::messages::MessageCatalog;
use crate::plate;
use crate::validation::validate_vehicle_draft;

// =============================================================================
// Plate Format
// =============================================================================

/// The two Brazilian plate grammars.
///
/// "Unknown" is not a variant: detection returns `Option<PlateFormat>` and
/// `None` means the input does not (yet) commit to either grammar.
///
/// ```text
///   Old (pre-2018)    L L L - D D D D     ABC-1234
///   New (Mercosul)    L L L D L D D       BRA2E19
///                           ▲ ▲
///                           │ └── 5th char decides: letter = New, digit = Old
///                           └──── 4th char is a digit in both
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlateFormat {
    /// Legacy grey plate: three letters, four digits, shown with a hyphen.
    Old,
    /// Mercosul plate: three letters, digit, letter, two digits, no separator.
    New,
}

impl PlateFormat {
    /// Example plate shown to the user when asking for this format.
    pub const fn usage_hint(&self) -> &'static str {
        match self {
            PlateFormat::Old => "AAA-1234",
            PlateFormat::New => "BRA2E19",
        }
    }

    /// Human label for lists and CLI output.
    pub const fn label(&self) -> &'static str {
        match self {
            PlateFormat::Old => "Antiga",
            PlateFormat::New => "Mercosul",
        }
    }
}

impl std::fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlateFormat::Old => write!(f, "old"),
            PlateFormat::New => write!(f, "new"),
        }
    }
}

impl std::str::FromStr for PlateFormat {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "old" | "antiga" | "legacy" => Ok(PlateFormat::Old),
            "new" | "mercosul" | "mercosur" => Ok(PlateFormat::New),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "format".to_string(),
                allowed: vec!["old".to_string(), "new".to_string()],
            }),
        }
    }
}

// =============================================================================
// Plate Validation Result
// =============================================================================

/// Outcome of validating a whole plate.
///
/// Serialized with camelCase keys (`isValid`, `errorMessage`) because the
/// mobile form reads it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlateValidation {
    /// True only for a 7-character plate matching one grammar.
    pub is_valid: bool,

    /// Detected grammar. `None` for every invalid result except
    /// [`PlateError::GrammarMismatch`].
    pub format: Option<PlateFormat>,

    /// Display value for the field.
    ///
    /// Masked for valid and incomplete plates; the untouched raw input for
    /// too-long and unrecognized plates.
    pub formatted: String,

    /// Machine-readable failure kind.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<PlateError>,

    /// User-facing failure text, rendered from a [`MessageCatalog`].
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error_message: Option<String>,
}

impl PlateValidation {
    /// A passing result.
    pub fn valid(format: PlateFormat, formatted: String) -> Self {
        PlateValidation {
            is_valid: true,
            format: Some(format),
            formatted,
            error: None,
            error_message: None,
        }
    }

    /// A failing result with its message rendered from `catalog`.
    pub fn invalid(
        format: Option<PlateFormat>,
        formatted: String,
        error: PlateError,
        catalog: &MessageCatalog,
    ) -> Self {
        PlateValidation {
            is_valid: false,
            format,
            formatted,
            error: Some(error),
            error_message: Some(catalog.message_for(&error)),
        }
    }

    /// Converts into `(format, formatted)` or the failure kind.
    pub fn into_result(self) -> Result<(PlateFormat, String), PlateError> {
        match (self.error, self.format) {
            (None, Some(format)) if self.is_valid => Ok((format, self.formatted)),
            (Some(error), _) => Err(error),
            // A result built by hand with no error and no format
            _ => Err(PlateError::UnrecognizedFormat),
        }
    }
}

// =============================================================================
// Vehicle Draft
// =============================================================================

/// What the user typed into the vehicle form.
///
/// Nothing here is trusted; run it through [`validate_vehicle_draft`] to get
/// a cleaned copy (trimmed text, masked plate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    /// Local or remote URI of the vehicle photo.
    #[serde(default)]
    pub photo_uri: Option<String>,
}

// =============================================================================
// Vehicle
// =============================================================================

/// A registered vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Plate in display form (`ABC-1234` or `BRA2E19`).
    pub plate: String,

    pub brand: String,

    pub model: String,

    /// Model year.
    pub year: i32,

    pub color: String,

    /// Local or remote URI of the vehicle photo.
    #[serde(default)]
    pub photo_uri: Option<String>,

    /// When the vehicle was registered.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the vehicle was last edited.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Validates a draft and builds a new record with a fresh UUID.
    pub fn register(draft: &VehicleDraft, now: DateTime<Utc>) -> CoreResult<Self> {
        Self::from_draft(draft, Uuid::new_v4(), now)
    }

    /// Validates a draft and builds a record under an id the caller chose
    /// (one assigned by the backend, or a fixed id in tests).
    ///
    /// `now` is passed in so the crate never reads the clock; its year is
    /// the reference for the newest model year allowed.
    pub fn from_draft(draft: &VehicleDraft, id: Uuid, now: DateTime<Utc>) -> CoreResult<Self> {
        let clean = validate_vehicle_draft(draft, now.year())?;
        Ok(Vehicle {
            id: id.hyphenated().to_string(),
            plate: clean.plate,
            brand: clean.brand,
            model: clean.model,
            year: clean.year,
            color: clean.color,
            photo_uri: clean.photo_uri,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces every editable field from a draft and bumps `updated_at`.
    ///
    /// On a validation failure the record is left untouched.
    pub fn apply_update(&mut self, draft: &VehicleDraft, now: DateTime<Utc>) -> CoreResult<()> {
        let clean = validate_vehicle_draft(draft, now.year())?;
        self.plate = clean.plate;
        self.brand = clean.brand;
        self.model = clean.model;
        self.year = clean.year;
        self.color = clean.color;
        self.photo_uri = clean.photo_uri;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the plate stripped of separators and uppercased.
    pub fn normalized_plate(&self) -> String {
        plate::normalize(&self.plate)
    }

    /// Returns the grammar of the stored plate, if it has one.
    pub fn plate_format(&self) -> Option<PlateFormat> {
        plate::detect_format(&self.normalized_plate())
    }

    /// Returns a draft pre-filled from this record, for the edit screen.
    pub fn to_draft(&self) -> VehicleDraft {
        VehicleDraft {
            plate: self.plate.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            color: self.color.clone(),
            photo_uri: self.photo_uri.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
