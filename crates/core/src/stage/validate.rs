//! Per-field validation rules for incoming stage data.
//!
//! One rule per field, all pure. Parsing validators double as parsers and
//! return the typed value on success. Validation runs before any persistence
//! call; the first violation aborts the whole operation.
//!
//! Field names in the returned errors use the external payload spelling
//! (`startDate`, `endDate`, `durationUnit`, `externalId`).

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::CoreError;
use crate::stage::{DurationUnit, StageStatus};
use crate::types::Timestamp;

/// Maximum length of the `name` field.
pub const NAME_MAX_LEN: usize = 255;
/// Maximum length of the `externalId` field.
pub const EXTERNAL_ID_MAX_LEN: usize = 255;

/// Accepted timestamp shape, e.g. `2022-12-31T14:59:00Z`.
const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#[0-9a-fA-F]{6}$").expect("valid color pattern"));

/// `name`: non-empty, at most 255 characters.
pub fn name(value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::validation("name", "name must not be empty"));
    }
    if value.len() > NAME_MAX_LEN {
        return Err(CoreError::validation(
            "name",
            format!("name must be at most {NAME_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

/// `startDate`: must parse as an ISO-8601 UTC instant.
pub fn start_date(value: &str) -> Result<Timestamp, CoreError> {
    parse_instant(value)
        .ok_or_else(|| CoreError::validation("startDate", invalid_instant_message(value)))
}

/// `endDate`: must parse as an ISO-8601 UTC instant and must not be earlier
/// than the effective start date (the supplied one on create; on patch, the
/// new start if supplied alongside, else the stored one).
pub fn end_date(value: &str, effective_start: Timestamp) -> Result<Timestamp, CoreError> {
    let end = parse_instant(value)
        .ok_or_else(|| CoreError::validation("endDate", invalid_instant_message(value)))?;
    if end < effective_start {
        return Err(CoreError::validation(
            "endDate",
            "end date cannot be earlier than start date",
        ));
    }
    Ok(end)
}

/// `durationUnit`: one of HOURS, DAYS, WEEKS.
pub fn duration_unit(value: &str) -> Result<DurationUnit, CoreError> {
    match value {
        "HOURS" => Ok(DurationUnit::Hours),
        "DAYS" => Ok(DurationUnit::Days),
        "WEEKS" => Ok(DurationUnit::Weeks),
        other => Err(CoreError::validation(
            "durationUnit",
            format!("invalid duration unit '{other}', use HOURS, DAYS or WEEKS"),
        )),
    }
}

/// `color`: `#` followed by exactly six hex digits, case-insensitive.
pub fn color(value: &str) -> Result<(), CoreError> {
    if !COLOR_RE.is_match(value) {
        return Err(CoreError::validation(
            "color",
            format!("invalid color '{value}', use HEX format, e.g. #FF0000"),
        ));
    }
    Ok(())
}

/// `externalId`: at most 255 characters.
pub fn external_id(value: &str) -> Result<(), CoreError> {
    if value.len() > EXTERNAL_ID_MAX_LEN {
        return Err(CoreError::validation(
            "externalId",
            format!("external id must be at most {EXTERNAL_ID_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

/// `status`: one of NEW, PLANNED, DELETED.
pub fn status(value: &str) -> Result<StageStatus, CoreError> {
    match value {
        "NEW" => Ok(StageStatus::New),
        "PLANNED" => Ok(StageStatus::Planned),
        "DELETED" => Ok(StageStatus::Deleted),
        other => Err(CoreError::validation(
            "status",
            format!("invalid status '{other}', use NEW, PLANNED or DELETED"),
        )),
    }
}

fn parse_instant(value: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(value, INSTANT_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn invalid_instant_message(value: &str) -> String {
    format!("invalid date '{value}', use ISO format, e.g. 2022-12-31T14:59:00Z")
}
