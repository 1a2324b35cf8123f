//! # frota-core: Pure Business Logic for Frota
//!
//! This crate holds the rules behind the vehicle registration form: the
//! Brazilian plate grammar, vehicle field validation and list search. Every
//! function is pure; nothing here touches the network, the cache or the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Frota Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile App (screens)                         │   │
//! │  │   Vehicle List ──► Vehicle Form ──► Plate Field ──► Submit      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ keystroke / blur / submit              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ frota-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   plate   │  │ messages  │  │validation │  │  search   │  │   │
//! │  │   │ normalize │  │  pt-BR /  │  │  Vehicle  │  │  filter   │  │   │
//! │  │   │ detect    │  │  en copy  │  │  drafts   │  │  sort     │  │   │
//! │  │   │ mask      │  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   └───────────┘                                                │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`plate`] - Plate normalization, format detection, masking, validation
//! - [`messages`] - User-facing copy for plate errors
//! - [`types`] - Domain types (PlateFormat, Vehicle, VehicleDraft, etc.)
//! - [`validation`] - Vehicle field rules
//! - [`search`] - Filtering and sorting a vehicle list
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use frota_core::plate::{format_plate_input, validate};
//! use frota_core::PlateFormat;
//!
//! // Keystroke by keystroke, the field shows the masked value
//! assert_eq!(format_plate_input("ABC", "ABC1"), "ABC1");
//! assert_eq!(format_plate_input("ABC1", "ABC12"), "ABC-12");
//!
//! // On submit the whole plate is checked
//! let result = validate("abc1234");
//! assert!(result.is_valid);
//! assert_eq!(result.format, Some(PlateFormat::Old));
//! assert_eq!(result.formatted, "ABC-1234");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod messages;
pub mod plate;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, PlateError, ValidationError};
pub use messages::{Locale, MessageCatalog, MessageOverrides};
pub use search::{VehicleFilter, VehicleSort};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of raw characters in a complete plate, in either grammar.
///
/// Both `ABC1234` and `BRA2E19` are seven characters once the display
/// hyphen is stripped. The keystroke formatter never lets a field grow past it.
pub const PLATE_LENGTH: usize = 7;

/// Length of the letter prefix shared by both grammars.
pub const PLATE_PREFIX_LENGTH: usize = 3;

/// Oldest model year accepted on a vehicle record.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Maximum characters in a brand name.
pub const MAX_BRAND_LENGTH: usize = 50;

/// Maximum characters in a model name.
pub const MAX_MODEL_LENGTH: usize = 50;

/// Maximum characters in a color name.
pub const MAX_COLOR_LENGTH: usize = 30;

/// Maximum characters in a photo URI.
pub const MAX_PHOTO_URI_LENGTH: usize = 2048;

/// Maximum characters in a list search query.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;
