//! # Plate Module
//!
//! Detection, masking and validation of Brazilian vehicle plates.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Plate Field Lifecycle                            │
//! │                                                                         │
//! │  raw "abc-12"                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize()        "ABC12"      strip non [A-Za-z0-9], uppercase      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  detect_format()    Some(Old)    commits once the 5th char is known    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_mask()       "ABC-12"     hyphen only for Old                   │
//! │       │                                                                 │
//! │       ├── every keystroke ──► format_plate_input()  (7-char budget)    │
//! │       │                                                                 │
//! │       └── submit / blur   ──► validate()            (full grammar)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial input
//! The classifier runs on every keystroke, so it has to cope with prefixes.
//! Up to four characters (`ABC1`) both grammars are still possible and no
//! format is reported. The fifth character settles it: a letter only occurs
//! there in Mercosul plates, a digit only in old ones.
//!
//! | length | pattern   | result |
//! |--------|-----------|--------|
//! | 0..=3  | any       | `None` |
//! | 4      | `LLLD`    | `None` |
//! | 5      | `LLLDL`   | `New`  |
//! | 5      | `LLLDD`   | `Old`  |
//! | 6      | `LLLDLD`  | `New`  |
//! | 6      | `LLLDDD`  | `Old`  |
//! | 7      | `LLLDDDD` | `Old`  |
//! | 7      | `LLLDLDD` | `New`  |
//! | 8..    | any       | `None` |

use regex::Regex;
use std::sync::LazyLock;
use tracing::error;

use crate::error::PlateError;
use crate::messages::MessageCatalog;
use crate::types::{PlateFormat, PlateValidation};
use crate::{PLATE_LENGTH, PLATE_PREFIX_LENGTH};

// =============================================================================
// Grammars
// =============================================================================

/// Full old plate, masked: `ABC-1234`.
static OLD_MASKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}-[0-9]{4}$").unwrap());

/// Full Mercosul plate: `BRA2E19`.
static NEW_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9][A-Z][0-9]{2}$").unwrap());

/// Five-character prefixes.
static NEW_PREFIX_5: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9][A-Z]$").unwrap());
static OLD_PREFIX_5: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{2}$").unwrap());

/// Six-character prefixes.
static NEW_PREFIX_6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9][A-Z][0-9]$").unwrap());
static OLD_PREFIX_6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{3}$").unwrap());

// =============================================================================
// Normalization
// =============================================================================

/// Strips everything but ASCII letters and digits, then uppercases.
///
/// No length limit is applied here.
///
/// ## Example
/// ```rust
/// use frota_core::plate::normalize;
///
/// assert_eq!(normalize("abc-1234"), "ABC1234");
/// assert_eq!(normalize(" bra 2e19 "), "BRA2E19");
/// assert_eq!(normalize("---"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// =============================================================================
// Classification
// =============================================================================

/// Detects the grammar of a normalized, possibly partial, plate.
///
/// Returns `None` when the input is too short to tell, is the ambiguous
/// `LLLD` prefix, is longer than a plate, or matches neither grammar.
///
/// ## Example
/// ```rust
/// use frota_core::plate::detect_format;
/// use frota_core::PlateFormat;
///
/// assert_eq!(detect_format("ABC2E"), Some(PlateFormat::New));
/// assert_eq!(detect_format("ABC23"), Some(PlateFormat::Old));
/// assert_eq!(detect_format("ABC2"), None);
/// ```
pub fn detect_format(normalized: &str) -> Option<PlateFormat> {
    if !normalized.is_ascii() {
        return None;
    }

    match normalized.len() {
        PLATE_LENGTH => {
            if OLD_MASKED.is_match(&insert_hyphen(normalized)) {
                Some(PlateFormat::Old)
            } else if NEW_FULL.is_match(normalized) {
                Some(PlateFormat::New)
            } else {
                None
            }
        }
        5 => classify_prefix(normalized, &NEW_PREFIX_5, &OLD_PREFIX_5),
        6 => classify_prefix(normalized, &NEW_PREFIX_6, &OLD_PREFIX_6),
        // 0..=3 is letters at best; 4 is `LLLD`, a prefix of both grammars
        _ => None,
    }
}

fn classify_prefix(normalized: &str, new: &Regex, old: &Regex) -> Option<PlateFormat> {
    if new.is_match(normalized) {
        Some(PlateFormat::New)
    } else if old.is_match(normalized) {
        Some(PlateFormat::Old)
    } else {
        None
    }
}

/// `ABC1234` → `ABC-1234`. Input must be ASCII and longer than the prefix.
fn insert_hyphen(normalized: &str) -> String {
    let end = normalized.len().min(PLATE_LENGTH);
    format!(
        "{}-{}",
        &normalized[..PLATE_PREFIX_LENGTH],
        &normalized[PLATE_PREFIX_LENGTH..end]
    )
}

// =============================================================================
// Masking
// =============================================================================

/// Produces the display form of a plate.
///
/// `format` is detected when not supplied. Old plates get a hyphen after the
/// third character once there is a fourth (the tail is cut at four
/// characters); Mercosul and undetected plates are shown as normalized.
///
/// ## Example
/// ```rust
/// use frota_core::plate::apply_mask;
/// use frota_core::PlateFormat;
///
/// assert_eq!(apply_mask("ABC1234", None), "ABC-1234");
/// assert_eq!(apply_mask("BRA2E19", None), "BRA2E19");
/// assert_eq!(apply_mask("ABC1", Some(PlateFormat::Old)), "ABC-1");
/// assert_eq!(apply_mask("ABC1", None), "ABC1");
/// ```
pub fn apply_mask(plate: &str, format: Option<PlateFormat>) -> String {
    let normalized = normalize(plate);
    if normalized.is_empty() {
        return normalized;
    }

    match format.or_else(|| detect_format(&normalized)) {
        Some(PlateFormat::Old) if normalized.len() > PLATE_PREFIX_LENGTH => {
            insert_hyphen(&normalized)
        }
        _ => normalized,
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a whole plate, with messages from the default (pt-BR) catalog.
///
/// ## Example
/// ```rust
/// use frota_core::plate::validate;
/// use frota_core::{PlateError, PlateFormat};
///
/// let ok = validate("abc1234");
/// assert!(ok.is_valid);
/// assert_eq!(ok.format, Some(PlateFormat::Old));
/// assert_eq!(ok.formatted, "ABC-1234");
///
/// let partial = validate("ABC12");
/// assert_eq!(partial.error, Some(PlateError::Incomplete));
/// assert_eq!(partial.formatted, "ABC-12");
/// ```
pub fn validate(raw: &str) -> PlateValidation {
    validate_with(raw, &MessageCatalog::default())
}

/// Validates a whole plate, rendering failures from `catalog`.
///
/// ## Rules
/// ```text
///   normalized length   result                formatted
///   ─────────────────   ───────────────────   ─────────────────────
///   0                   Empty                 ""
///   1..=6               Incomplete            masked partial
///   8..                 TooLong               raw input, untouched
///   7, no grammar       UnrecognizedFormat    raw input, untouched
///   7, Old / New        valid                 masked
/// ```
/// The masked-vs-raw asymmetry is what the form expects to display.
pub fn validate_with(raw: &str, catalog: &MessageCatalog) -> PlateValidation {
    let normalized = normalize(raw);
    let length = normalized.len();

    if length == 0 {
        return PlateValidation::invalid(None, String::new(), PlateError::Empty, catalog);
    }

    if length < PLATE_LENGTH {
        return PlateValidation::invalid(
            None,
            apply_mask(&normalized, None),
            PlateError::Incomplete,
            catalog,
        );
    }

    if length > PLATE_LENGTH {
        return PlateValidation::invalid(None, raw.to_string(), PlateError::TooLong, catalog);
    }

    let Some(format) = detect_format(&normalized) else {
        return PlateValidation::invalid(
            None,
            raw.to_string(),
            PlateError::UnrecognizedFormat,
            catalog,
        );
    };

    let formatted = apply_mask(&normalized, Some(format));
    if let Err(err) = confirm_grammar(format, &normalized, &formatted) {
        error!(%format, plate = %normalized, "Detected plate failed its full grammar check");
        return PlateValidation::invalid(Some(format), raw.to_string(), err, catalog);
    }

    PlateValidation::valid(format, formatted)
}

/// Re-checks a detected plate against its full grammar.
///
/// Old plates are checked in masked form, Mercosul plates as normalized.
fn confirm_grammar(
    format: PlateFormat,
    normalized: &str,
    formatted: &str,
) -> Result<(), PlateError> {
    let matches = match format {
        PlateFormat::Old => OLD_MASKED.is_match(formatted),
        PlateFormat::New => NEW_FULL.is_match(normalized),
    };

    if matches {
        Ok(())
    } else {
        Err(PlateError::GrammarMismatch { format })
    }
}

// =============================================================================
// Keystroke Formatting
// =============================================================================

/// Computes the next display value for the plate field.
///
/// `previous` is the value the field last showed; `next` is the raw buffer
/// after the keystroke. An edit that would take the plate past seven
/// characters is dropped and `previous` comes back unchanged.
///
/// ## Example
/// ```rust
/// use frota_core::plate::format_plate_input;
///
/// assert_eq!(format_plate_input("ABC-12", "ABC-123"), "ABC-123");
/// assert_eq!(format_plate_input("ABC-123", "ABC-1234X"), "ABC-123");
/// assert_eq!(format_plate_input("BRA2E1", "bra2e19"), "BRA2E19");
/// ```
pub fn format_plate_input(previous: &str, next: &str) -> String {
    let normalized = normalize(next);
    if normalized.len() > PLATE_LENGTH {
        return previous.to_string();
    }

    apply_mask(&normalized, None)
}

// =============================================================================
// Unit Tests
// =============================================================================
