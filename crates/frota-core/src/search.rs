//! # Search Module
//!
//! Filtering, sorting and lookups over an in-memory vehicle list.
//!
//! The list screen keeps whatever the backend (or the cache) returned and
//! narrows it locally as the user types, so everything here works on slices
//! and borrows; nothing is fetched.
//!
//! ## Query matching
//! ```text
//!   query "abc1234"  ─┬─► lowercase substring of brand / model / color
//!                     └─► normalized substring of the plate
//!                         ("abc1234" → "ABC1234" finds "ABC-1234")
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::plate;
use crate::types::{PlateFormat, Vehicle};
use crate::validation::{validate_search_query, validate_vehicle_id};

// =============================================================================
// Sort Order
// =============================================================================

/// Order of the vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VehicleSort {
    /// Most recently registered first.
    #[default]
    Newest,
    /// First registered first.
    Oldest,
    /// Plate, alphabetical.
    Plate,
    /// Brand then model, alphabetical.
    Brand,
    /// Newest model year first.
    YearDesc,
    /// Oldest model year first.
    YearAsc,
}

impl std::fmt::Display for VehicleSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleSort::Newest => write!(f, "newest"),
            VehicleSort::Oldest => write!(f, "oldest"),
            VehicleSort::Plate => write!(f, "plate"),
            VehicleSort::Brand => write!(f, "brand"),
            VehicleSort::YearDesc => write!(f, "year-desc"),
            VehicleSort::YearAsc => write!(f, "year-asc"),
        }
    }
}

impl std::str::FromStr for VehicleSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "newest" | "recent" => Ok(VehicleSort::Newest),
            "oldest" => Ok(VehicleSort::Oldest),
            "plate" => Ok(VehicleSort::Plate),
            "brand" => Ok(VehicleSort::Brand),
            "year-desc" | "year" => Ok(VehicleSort::YearDesc),
            "year-asc" => Ok(VehicleSort::YearAsc),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: ["newest", "oldest", "plate", "brand", "year-desc", "year-asc"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Criteria for narrowing the vehicle list. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct VehicleFilter {
    /// Free text over plate, brand, model and color.
    #[ts(optional)]
    pub query: Option<String>,

    /// Exact brand, case-insensitive.
    #[ts(optional)]
    pub brand: Option<String>,

    /// Inclusive lower bound on model year.
    #[ts(optional)]
    pub year_from: Option<i32>,

    /// Inclusive upper bound on model year.
    #[ts(optional)]
    pub year_to: Option<i32>,

    /// Only plates of this grammar.
    #[ts(optional)]
    pub format: Option<PlateFormat>,

    pub sort: VehicleSort,
}

/// A filter with its query checked and pre-folded once per search.
struct PreparedFilter<'f> {
    filter: &'f VehicleFilter,
    text: String,
    plate: String,
    brand: Option<String>,
}

impl<'f> PreparedFilter<'f> {
    fn new(filter: &'f VehicleFilter) -> CoreResult<Self> {
        let query = validate_search_query(filter.query.as_deref().unwrap_or_default())?;

        if let (Some(from), Some(to)) = (filter.year_from, filter.year_to) {
            if from > to {
                return Err(ValidationError::InvalidFormat {
                    field: "yearFrom".to_string(),
                    reason: "must not exceed yearTo".to_string(),
                }
                .into());
            }
        }

        Ok(PreparedFilter {
            filter,
            text: query.to_lowercase(),
            plate: plate::normalize(&query),
            brand: filter
                .brand
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_lowercase),
        })
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(brand) = &self.brand {
            if vehicle.brand.to_lowercase() != *brand {
                return false;
            }
        }

        if self.filter.year_from.is_some_and(|from| vehicle.year < from)
            || self.filter.year_to.is_some_and(|to| vehicle.year > to)
        {
            return false;
        }

        if let Some(format) = self.filter.format {
            if vehicle.plate_format() != Some(format) {
                return false;
            }
        }

        self.matches_query(vehicle)
    }

    fn matches_query(&self, vehicle: &Vehicle) -> bool {
        if self.text.is_empty() {
            return true;
        }

        let text_hit = [&vehicle.brand, &vehicle.model, &vehicle.color]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.text));

        text_hit || (!self.plate.is_empty() && vehicle.normalized_plate().contains(&self.plate))
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Returns the vehicles matching `filter`, in the filter's sort order.
///
/// Ties are broken by normalized plate so the order is stable across calls.
///
/// ## Errors
/// - Query longer than 100 characters
/// - `yearFrom` greater than `yearTo`
pub fn filter_vehicles<'a>(
    vehicles: &'a [Vehicle],
    filter: &VehicleFilter,
) -> CoreResult<Vec<&'a Vehicle>> {
    let prepared = PreparedFilter::new(filter)?;

    let mut matched: Vec<&Vehicle> = vehicles.iter().filter(|v| prepared.matches(v)).collect();
    sort_vehicles(&mut matched, filter.sort);

    debug!(
        total = vehicles.len(),
        matched = matched.len(),
        sort = %filter.sort,
        "Filtered vehicle list"
    );
    Ok(matched)
}

/// Sorts borrowed vehicles in place.
pub fn sort_vehicles(vehicles: &mut [&Vehicle], sort: VehicleSort) {
    vehicles.sort_by(|a, b| {
        let primary = match sort {
            VehicleSort::Newest => b.created_at.cmp(&a.created_at),
            VehicleSort::Oldest => a.created_at.cmp(&b.created_at),
            VehicleSort::Plate => std::cmp::Ordering::Equal,
            VehicleSort::Brand => a
                .brand
                .to_lowercase()
                .cmp(&b.brand.to_lowercase())
                .then_with(|| a.model.to_lowercase().cmp(&b.model.to_lowercase())),
            VehicleSort::YearDesc => b.year.cmp(&a.year),
            VehicleSort::YearAsc => a.year.cmp(&b.year),
        };
        primary.then_with(|| a.normalized_plate().cmp(&b.normalized_plate()))
    });
}

/// Finds a vehicle by id, in any form the uuid crate parses
/// (hyphenated, simple, braced, urn).
pub fn find_by_id<'a>(vehicles: &'a [Vehicle], id: &str) -> CoreResult<&'a Vehicle> {
    let wanted = validate_vehicle_id(id)?;

    vehicles
        .iter()
        .find(|v| uuid::Uuid::parse_str(&v.id).is_ok_and(|own| own == wanted))
        .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()))
}

/// Finds a vehicle by plate, in any typing (`abc1234`, `ABC-1234`).
///
/// The plate must be complete and valid; a partial plate is a
/// [`CoreError::Plate`], not a miss.
pub fn find_by_plate<'a>(vehicles: &'a [Vehicle], raw_plate: &str) -> CoreResult<&'a Vehicle> {
    let (format, formatted) = plate::validate(raw_plate).into_result()?;
    let wanted = plate::normalize(&formatted);
    trace!(%format, plate = %formatted, "Looking up vehicle by plate");

    vehicles
        .iter()
        .find(|v| v.normalized_plate() == wanted)
        .ok_or(CoreError::VehicleNotFound(formatted))
}

/// Distinct brands in the list, for the brand picker.
///
/// Case variants collapse to the first spelling seen; output is sorted.
pub fn distinct_brands(vehicles: &[Vehicle]) -> Vec<String> {
    let mut seen = std::collections::BTreeMap::new();
    for vehicle in vehicles {
        let brand = vehicle.brand.trim();
        if !brand.is_empty() {
            seen.entry(brand.to_lowercase())
                .or_insert_with(|| brand.to_string());
        }
    }
    seen.into_values().collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlateError;
    use chrono::{TimeZone, Utc};

    fn vehicle(id: u128, plate: &str, brand: &str, model: &str, year: i32, day: u32) -> Vehicle {
        let at = Utc.with_ymd_and_hms(2026, 1, day, 9, 0, 0).unwrap();
        Vehicle {
            id: uuid::Uuid::from_u128(id).to_string(),
            plate: plate.to_string(),
            brand: brand.to_string(),
            model: model.to_string(),
            year,
            color: "Prata".to_string(),
            photo_uri: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn fleet() -> Vec<Vehicle> {
        vec![
            vehicle(1, "ABC-1234", "Fiat", "Uno", 2010, 1),
            vehicle(2, "BRA2E19", "Volkswagen", "Gol", 2021, 2),
            vehicle(3, "XYZ-9876", "fiat", "Argo", 2019, 3),
            vehicle(4, "RIO2A18", "Chevrolet", "Onix", 2023, 4),
        ]
    }

    fn plates(list: &[&Vehicle]) -> Vec<String> {
        list.iter().map(|v| v.plate.clone()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all_newest_first() {
        let fleet = fleet();
        let all = filter_vehicles(&fleet, &VehicleFilter::default()).unwrap();
        assert_eq!(plates(&all), ["RIO2A18", "XYZ-9876", "BRA2E19", "ABC-1234"]);
    }

    #[test]
    fn test_query_matches_plate_in_any_typing() {
        let fleet = fleet();
        let filter = VehicleFilter {
            query: Some("abc1234".to_string()),
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(plates(&found), ["ABC-1234"]);

        let filter = VehicleFilter {
            query: Some("2e1".to_string()),
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(plates(&found), ["BRA2E19"]);
    }

    #[test]
    fn test_query_matches_text_fields() {
        let fleet = fleet();
        let filter = VehicleFilter {
            query: Some("ONI".to_string()),
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(plates(&found), ["RIO2A18"]);

        let filter = VehicleFilter {
            query: Some("prata".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_vehicles(&fleet, &filter).unwrap().len(), 4);
    }

    #[test]
    fn test_brand_year_and_format_filters() {
        let fleet = fleet();
        let filter = VehicleFilter {
            brand: Some(" FIAT ".to_string()),
            sort: VehicleSort::YearAsc,
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(plates(&found), ["ABC-1234", "XYZ-9876"]);

        let filter = VehicleFilter {
            year_from: Some(2019),
            year_to: Some(2021),
            sort: VehicleSort::Plate,
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(plates(&found), ["BRA2E19", "XYZ-9876"]);

        let filter = VehicleFilter {
            format: Some(PlateFormat::New),
            sort: VehicleSort::Oldest,
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(plates(&found), ["BRA2E19", "RIO2A18"]);
    }

    #[test]
    fn test_sort_brand_then_model() {
        let fleet = fleet();
        let filter = VehicleFilter {
            sort: VehicleSort::Brand,
            ..Default::default()
        };
        let found = filter_vehicles(&fleet, &filter).unwrap();
        assert_eq!(
            plates(&found),
            ["RIO2A18", "XYZ-9876", "ABC-1234", "BRA2E19"]
        );
    }

    #[test]
    fn test_invalid_filters() {
        let fleet = fleet();
        let filter = VehicleFilter {
            query: Some("q".repeat(101)),
            ..Default::default()
        };
        assert!(matches!(
            filter_vehicles(&fleet, &filter),
            Err(CoreError::Validation(ValidationError::TooLong { .. }))
        ));

        let filter = VehicleFilter {
            year_from: Some(2022),
            year_to: Some(2020),
            ..Default::default()
        };
        match filter_vehicles(&fleet, &filter) {
            Err(CoreError::Validation(ValidationError::InvalidFormat { field, reason })) => {
                assert_eq!(field, "yearFrom");
                assert_eq!(reason, "must not exceed yearTo");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        // Bounds are not clamped to plausible model years
        let filter = VehicleFilter {
            year_from: Some(1800),
            year_to: Some(2015),
            ..Default::default()
        };
        assert_eq!(plates(&filter_vehicles(&fleet, &filter).unwrap()), ["ABC-1234"]);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("year_desc".parse::<VehicleSort>().unwrap(), VehicleSort::YearDesc);
        assert_eq!("Plate".parse::<VehicleSort>().unwrap(), VehicleSort::Plate);
        assert!("price".parse::<VehicleSort>().is_err());
    }

    #[test]
    fn test_find_by_plate() {
        let fleet = fleet();
        assert_eq!(find_by_plate(&fleet, "xyz9876").unwrap().model, "Argo");
        assert_eq!(find_by_plate(&fleet, "bra-2e19").unwrap().model, "Gol");

        assert!(matches!(
            find_by_plate(&fleet, "ABC12"),
            Err(CoreError::Plate(PlateError::Incomplete))
        ));
        assert!(matches!(
            find_by_plate(&fleet, "DEF5678"),
            Err(CoreError::VehicleNotFound(p)) if p == "DEF-5678"
        ));
    }

    #[test]
    fn test_find_by_id() {
        let fleet = fleet();
        let id = uuid::Uuid::from_u128(2).to_string();
        assert_eq!(find_by_id(&fleet, &id).unwrap().plate, "BRA2E19");

        let missing = uuid::Uuid::from_u128(99).to_string();
        assert!(matches!(
            find_by_id(&fleet, &missing),
            Err(CoreError::VehicleNotFound(_))
        ));
        assert!(matches!(
            find_by_id(&fleet, "nope"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_find_by_id_accepts_every_uuid_form() {
        let fleet = fleet();
        let id = uuid::Uuid::from_u128(3);

        for form in [
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
            id.hyphenated().to_string().to_uppercase(),
        ] {
            assert_eq!(find_by_id(&fleet, &form).unwrap().plate, "XYZ-9876", "{form}");
        }
    }

    #[test]
    fn test_distinct_brands() {
        assert_eq!(
            distinct_brands(&fleet()),
            ["Chevrolet", "Fiat", "Volkswagen"]
        );
    }
}
