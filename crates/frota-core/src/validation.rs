//! # Validation Module
//!
//! Field rules for the vehicle form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Plate field (every keystroke)                                │
//! │  ├── plate::format_plate_input - mask, 7-char budget                   │
//! │  └── Immediate visual feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form submit                                                  │
//! │  ├── THIS MODULE: every field of the VehicleDraft                      │
//! │  └── First failing field is reported                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Uniqueness of plate, ownership, etc.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use frota_core::validation::{validate_brand, validate_year};
//!
//! assert_eq!(validate_brand("  Volkswagen ").unwrap(), "Volkswagen");
//! assert!(validate_year(1885, 2026).is_err());
//! ```

use crate::error::ValidationError;
use crate::messages::MessageCatalog;
use crate::plate;
use crate::types::VehicleDraft;
use crate::{
    MAX_BRAND_LENGTH, MAX_COLOR_LENGTH, MAX_MODEL_LENGTH, MAX_PHOTO_URI_LENGTH,
    MAX_SEARCH_QUERY_LENGTH, MIN_VEHICLE_YEAR,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// URI schemes the app produces for photos (picker, camera roll, backend).
const PHOTO_URI_SCHEMES: &[&str] = &["file://", "content://", "http://", "https://"];

// =============================================================================
// Plate
// =============================================================================

/// Validates the plate field, returning its masked form.
///
/// ## Example
/// ```rust
/// use frota_core::validation::validate_plate_field;
///
/// assert_eq!(validate_plate_field("abc1234").unwrap(), "ABC-1234");
/// assert!(validate_plate_field("ABC12").is_err());
/// ```
pub fn validate_plate_field(raw: &str) -> ValidationResult<String> {
    validate_plate_field_with(raw, &MessageCatalog::default())
}

/// Same as [`validate_plate_field`], with messages from `catalog`.
pub fn validate_plate_field_with(
    raw: &str,
    catalog: &MessageCatalog,
) -> ValidationResult<String> {
    let result = plate::validate_with(raw, catalog);
    let reason = result.error_message.clone().unwrap_or_default();

    result
        .into_result()
        .map(|(_, formatted)| formatted)
        .map_err(|error| ValidationError::InvalidPlate { error, reason })
}

// =============================================================================
// Text Fields
// =============================================================================

/// Trims, then checks presence and maximum length (in characters).
fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a brand name ("Fiat", "Chevrolet"), returning it trimmed.
pub fn validate_brand(brand: &str) -> ValidationResult<String> {
    required_text("brand", brand, MAX_BRAND_LENGTH)
}

/// Validates a model name ("Uno", "Onix Plus"), returning it trimmed.
pub fn validate_model(model: &str) -> ValidationResult<String> {
    required_text("model", model, MAX_MODEL_LENGTH)
}

/// Validates a color name, returning it trimmed.
pub fn validate_color(color: &str) -> ValidationResult<String> {
    required_text("color", color, MAX_COLOR_LENGTH)
}

// =============================================================================
// Numeric Fields
// =============================================================================

/// Validates a model year.
///
/// ## Rules
/// - Not older than [`MIN_VEHICLE_YEAR`]
/// - Not newer than next year (next year's models go on sale early)
///
/// `reference_year` is the current calendar year, supplied by the caller.
///
/// ## Example
/// ```rust
/// use frota_core::validation::validate_year;
///
/// assert!(validate_year(2027, 2026).is_ok());
/// assert!(validate_year(2028, 2026).is_err());
/// ```
pub fn validate_year(year: i32, reference_year: i32) -> ValidationResult<()> {
    let max = reference_year.saturating_add(1);

    if year < MIN_VEHICLE_YEAR || year > max {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: MIN_VEHICLE_YEAR as i64,
            max: max as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Photo
// =============================================================================

/// Validates the optional photo URI, returning it trimmed.
///
/// ## Rules
/// - Absent is fine
/// - Present means non-blank, at most 2048 characters, and a scheme the app
///   produces (`file://`, `content://`, `http://`, `https://`)
pub fn validate_photo_uri(uri: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(uri) = uri else {
        return Ok(None);
    };
    let uri = uri.trim();

    if uri.is_empty() {
        return Err(ValidationError::Required {
            field: "photo".to_string(),
        });
    }

    if uri.chars().count() > MAX_PHOTO_URI_LENGTH {
        return Err(ValidationError::TooLong {
            field: "photo".to_string(),
            max: MAX_PHOTO_URI_LENGTH,
        });
    }

    let lower = uri.to_ascii_lowercase();
    if !PHOTO_URI_SCHEMES.iter().any(|scheme| lower.starts_with(*scheme)) {
        return Err(ValidationError::InvalidFormat {
            field: "photo".to_string(),
            reason: "must be a file, content or http(s) URI".to_string(),
        });
    }

    Ok(Some(uri.to_string()))
}

// =============================================================================
// Whole Draft
// =============================================================================

/// Validates every field of a draft, in form order.
///
/// Returns a cleaned copy (trimmed text, masked plate) or the first
/// failing field.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Vehicle Form: Save                                                     │
/// │                                                                         │
/// │  validate_vehicle_draft(draft, 2026) ← THIS FUNCTION                   │
/// │       │                                                                 │
/// │       ├── plate bad?  → InvalidPlate { "Placa incompleta" }            │
/// │       ├── brand/model/color blank or long? → Required / TooLong        │
/// │       ├── year outside 1900..=2027? → OutOfRange                       │
/// │       ├── photo URI odd? → InvalidFormat                               │
/// │       │                                                                 │
/// │       └── OK → cleaned draft goes to the REST client                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_vehicle_draft(
    draft: &VehicleDraft,
    reference_year: i32,
) -> ValidationResult<VehicleDraft> {
    validate_vehicle_draft_with(draft, reference_year, &MessageCatalog::default())
}

/// Same as [`validate_vehicle_draft`], with plate messages from `catalog`.
pub fn validate_vehicle_draft_with(
    draft: &VehicleDraft,
    reference_year: i32,
    catalog: &MessageCatalog,
) -> ValidationResult<VehicleDraft> {
    let plate = validate_plate_field_with(&draft.plate, catalog)?;
    let brand = validate_brand(&draft.brand)?;
    let model = validate_model(&draft.model)?;
    validate_year(draft.year, reference_year)?;
    let color = validate_color(&draft.color)?;
    let photo_uri = validate_photo_uri(draft.photo_uri.as_deref())?;

    Ok(VehicleDraft {
        plate,
        brand,
        model,
        year: draft.year,
        color,
        photo_uri,
    })
}

// =============================================================================
// Search & Identifiers
// =============================================================================

/// Validates a list search query.
///
/// ## Rules
/// - Can be empty (shows the whole list)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

/// Validates a vehicle id (UUID).
///
/// ## Example
/// ```rust
/// use frota_core::validation::validate_vehicle_id;
///
/// assert!(validate_vehicle_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_vehicle_id("not-a-uuid").is_err());
/// ```
pub fn validate_vehicle_id(id: &str) -> ValidationResult<uuid::Uuid> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
