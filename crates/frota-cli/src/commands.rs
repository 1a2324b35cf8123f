//! # Commands
//!
//! One function per `frota` subcommand.
//!
//! ## Command Pattern
//! ```text
//! main.rs (clap)  ──►  commands::validate(...)  ──►  frota_core::plate
//!                              │
//!                              ▼
//!                       Report { text, ok }  ──►  stdout + exit code
//! ```
//!
//! Commands never print; they return a [`Report`] so tests can check the
//! exact output.

use std::path::Path;

use chrono::{DateTime, Utc};
use frota_core::plate::{self, apply_mask, detect_format, format_plate_input, normalize};
use frota_core::search::filter_vehicles;
use frota_core::validation::validate_vehicle_draft_with;
use frota_core::{
    MessageCatalog, PlateFormat, PlateValidation, Vehicle, VehicleDraft, VehicleFilter,
    PLATE_LENGTH,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::error::CliResult;

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Text for stdout.
    pub text: String,
    /// False when a plate or draft was rejected (exit code 1).
    pub ok: bool,
}

impl Report {
    fn new(text: String, ok: bool) -> Self {
        Report { text, ok }
    }
}

fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn format_name(format: Option<PlateFormat>) -> String {
    match format {
        Some(format) => format!("{} ({})", format, format.label()),
        None => "unknown".to_string(),
    }
}

// =============================================================================
// detect
// =============================================================================

#[derive(Serialize)]
struct Detection {
    input: String,
    normalized: String,
    format: Option<PlateFormat>,
}

/// Reports the grammar of a possibly partial plate.
pub fn detect(raw: &str, output: OutputFormat) -> CliResult<Report> {
    let normalized = normalize(raw);
    let format = detect_format(&normalized);

    let text = match output {
        OutputFormat::Text => format!("{}  {}", normalized, format_name(format)),
        OutputFormat::Json => to_json(&Detection {
            input: raw.to_string(),
            normalized,
            format,
        })?,
    };
    Ok(Report::new(text, true))
}

// =============================================================================
// mask
// =============================================================================

/// Prints the display form of a plate.
pub fn mask(raw: &str, format: Option<PlateFormat>, output: OutputFormat) -> CliResult<Report> {
    let masked = apply_mask(raw, format);

    let text = match output {
        OutputFormat::Text => masked,
        OutputFormat::Json => to_json(&serde_json::json!({ "masked": masked }))?,
    };
    Ok(Report::new(text, true))
}

// =============================================================================
// validate
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationLine<'a> {
    input: &'a str,
    #[serde(flatten)]
    result: &'a PlateValidation,
}

/// Validates each plate; the report fails if any plate is invalid.
pub fn validate(
    plates: &[String],
    catalog: &MessageCatalog,
    output: OutputFormat,
) -> CliResult<Report> {
    let results: Vec<PlateValidation> = plates
        .iter()
        .map(|raw| plate::validate_with(raw, catalog))
        .collect();
    let ok = results.iter().all(|r| r.is_valid);
    info!(
        count = results.len(),
        invalid = results.iter().filter(|r| !r.is_valid).count(),
        "Validated plates"
    );

    let text = match output {
        OutputFormat::Text => plates
            .iter()
            .zip(&results)
            .map(|(raw, result)| {
                if result.is_valid {
                    format!("{}  valid  {}", result.formatted, format_name(result.format))
                } else {
                    format!(
                        "{}  invalid  {}",
                        raw,
                        result.error_message.as_deref().unwrap_or_default()
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let lines: Vec<ValidationLine> = plates
                .iter()
                .zip(&results)
                .map(|(raw, result)| ValidationLine { input: raw, result })
                .collect();
            to_json(&lines)?
        }
    };
    Ok(Report::new(text, ok))
}

// =============================================================================
// type
// =============================================================================

#[derive(Debug, Serialize)]
struct Keystroke {
    key: char,
    shown: String,
    accepted: bool,
}

/// Replays typing `keystrokes` into an empty plate field, one at a time.
///
/// Each step feeds the previously shown value plus the new key through
/// `format_plate_input`, the way the form does.
pub fn replay_typing(keystrokes: &str, output: OutputFormat) -> CliResult<Report> {
    let mut shown = String::new();
    let mut steps = Vec::new();

    for key in keystrokes.chars() {
        let buffer = format!("{shown}{key}");
        let next = format_plate_input(&shown, &buffer);
        let accepted = normalize(&buffer).len() <= PLATE_LENGTH;
        debug!(%key, %next, accepted, "Keystroke");
        shown = next;
        steps.push(Keystroke {
            key,
            shown: shown.clone(),
            accepted,
        });
    }

    let text = match output {
        OutputFormat::Text => steps
            .iter()
            .map(|step| {
                let note = if step.accepted { "" } else { "  (dropped)" };
                format!("{:?}  {}{}", step.key, step.shown, note)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => to_json(&steps)?,
    };
    Ok(Report::new(text, true))
}

// =============================================================================
// vehicle
// =============================================================================

/// Validates a vehicle draft and, if it passes, prints the record the app
/// would register.
pub fn vehicle(
    draft: &VehicleDraft,
    now: DateTime<Utc>,
    catalog: &MessageCatalog,
    output: OutputFormat,
) -> CliResult<Report> {
    use chrono::Datelike;

    let clean = match validate_vehicle_draft_with(draft, now.year(), catalog) {
        Ok(clean) => clean,
        Err(err) => {
            let text = match output {
                OutputFormat::Text => format!("invalid  {}", err),
                OutputFormat::Json => {
                    to_json(&serde_json::json!({ "valid": false, "error": err.to_string() }))?
                }
            };
            return Ok(Report::new(text, false));
        }
    };

    let record = Vehicle::register(&clean, now)?;
    let text = match output {
        OutputFormat::Text => format!(
            "valid  {} {} {} {} {}",
            record.plate, record.brand, record.model, record.year, record.color
        ),
        OutputFormat::Json => to_json(&record)?,
    };
    Ok(Report::new(text, true))
}

// =============================================================================
// search
// =============================================================================

/// Reads a JSON array of vehicles and prints those matching `filter`.
pub fn search(file: &Path, filter: &VehicleFilter, output: OutputFormat) -> CliResult<Report> {
    let contents = std::fs::read_to_string(file)?;
    let vehicles: Vec<Vehicle> = serde_json::from_str(&contents)?;
    let matched = filter_vehicles(&vehicles, filter)?;

    let text = match output {
        OutputFormat::Text => matched
            .iter()
            .map(|v| {
                format!(
                    "{:<9} {:<12} {:<14} {}  {}",
                    v.plate, v.brand, v.model, v.year, v.color
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => to_json(&matched)?,
    };
    Ok(Report::new(text, true))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_detect() {
        let report = detect("abc2e", OutputFormat::Text).unwrap();
        assert_eq!(report.text, "ABC2E  new (Mercosul)");

        let report = detect("ABC2", OutputFormat::Text).unwrap();
        assert_eq!(report.text, "ABC2  unknown");

        let report = detect("abc-23", OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.text).unwrap();
        assert_eq!(json["normalized"], "ABC23");
        assert_eq!(json["format"], "old");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abc1234", None, OutputFormat::Text).unwrap().text, "ABC-1234");
        assert_eq!(
            mask("abc1", Some(PlateFormat::Old), OutputFormat::Text).unwrap().text,
            "ABC-1"
        );
    }

    #[test]
    fn test_validate_text() {
        let plates = vec!["abc1234".to_string(), "ABC12".to_string()];
        let report = validate(&plates, &MessageCatalog::default(), OutputFormat::Text).unwrap();
        assert!(!report.ok);
        assert_eq!(
            report.text,
            "ABC-1234  valid  old (Antiga)\nABC12  invalid  Placa incompleta"
        );
    }

    #[test]
    fn test_validate_json() {
        let plates = vec!["BRA2E19".to_string()];
        let report = validate(&plates, &MessageCatalog::english(), OutputFormat::Json).unwrap();
        assert!(report.ok);
        let json: serde_json::Value = serde_json::from_str(&report.text).unwrap();
        assert_eq!(json[0]["input"], "BRA2E19");
        assert_eq!(json[0]["isValid"], true);
        assert_eq!(json[0]["format"], "new");
    }

    #[test]
    fn test_replay_typing_drops_overflow() {
        let report = replay_typing("abc12345", OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.text).unwrap();
        let shown: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["shown"].as_str().unwrap())
            .collect();
        assert_eq!(
            shown,
            ["A", "AB", "ABC", "ABC1", "ABC-12", "ABC-123", "ABC-1234", "ABC-1234"]
        );
        assert_eq!(json[7]["accepted"], false);
    }

    #[test]
    fn test_vehicle_valid() {
        let draft = VehicleDraft {
            plate: "bra2e19".to_string(),
            brand: "Fiat".to_string(),
            model: "Pulse".to_string(),
            year: 2027,
            color: "Azul".to_string(),
            photo_uri: None,
        };
        let report = vehicle(&draft, now(), &MessageCatalog::default(), OutputFormat::Text).unwrap();
        assert!(report.ok);
        assert_eq!(report.text, "valid  BRA2E19 Fiat Pulse 2027 Azul");
    }

    #[test]
    fn test_vehicle_invalid_uses_catalog() {
        let draft = VehicleDraft {
            plate: "bra2e1".to_string(),
            brand: "Fiat".to_string(),
            model: "Pulse".to_string(),
            year: 2022,
            color: "Azul".to_string(),
            photo_uri: None,
        };
        let report = vehicle(&draft, now(), &MessageCatalog::english(), OutputFormat::Text).unwrap();
        assert!(!report.ok);
        assert_eq!(report.text, "invalid  plate is invalid: incomplete plate");
    }

    #[test]
    fn test_search_file() {
        let vehicles = vec![
            Vehicle::register(
                &VehicleDraft {
                    plate: "ABC1234".into(),
                    brand: "Fiat".into(),
                    model: "Uno".into(),
                    year: 2010,
                    color: "Prata".into(),
                    photo_uri: None,
                },
                now(),
            )
            .unwrap(),
            Vehicle::register(
                &VehicleDraft {
                    plate: "BRA2E19".into(),
                    brand: "Volkswagen".into(),
                    model: "Gol".into(),
                    year: 2021,
                    color: "Branco".into(),
                    photo_uri: None,
                },
                now(),
            )
            .unwrap(),
        ];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&vehicles).unwrap()).unwrap();

        let filter = VehicleFilter {
            query: Some("gol".into()),
            ..Default::default()
        };
        let report = search(file.path(), &filter, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.text).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["plate"], "BRA2E19");
        assert!(uuid::Uuid::parse_str(json[0]["id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_search_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = search(
            &dir.path().join("none.json"),
            &VehicleFilter::default(),
            OutputFormat::Text,
        );
        assert!(matches!(result, Err(crate::error::CliError::Io(_))));
    }
}
