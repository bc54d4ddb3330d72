//! Argument validation shared by the tool builders.
//!
//! Every check returns [`ToolError::InvalidParams`] naming the offending
//! argument, so callers get a precise message before any request is made.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::{ToolError, ToolResult};
use crate::query::split_list;

pub const OGC_MAX_LIMIT: u32 = 10_000;

const SITE_MIN_DIGITS: usize = 8;
const SITE_MAX_DIGITS: usize = 15;
const PARAMETER_CODE_DIGITS: usize = 5;
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

/// A parsed `start_date`/`end_date`.
///
/// Values without an offset are read by NWIS in the site's local time, so
/// they only compare against other local values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Local(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl DateBound {
    /// Orders two bounds when they share a reference frame.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Self::Local(left), Self::Local(right)) => Some(left > right),
            (Self::Offset(left), Self::Offset(right)) => Some(left > right),
            _ => None,
        }
    }
}

/// Output format of the instantaneous values service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    /// USGS tab-delimited text.
    Rdb,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Rdb => "rdb",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "rdb" => Ok(Self::Rdb),
            other => Err(ToolError::invalid(
                "format",
                format!("expected `json` or `rdb`, got `{other}`"),
            )),
        }
    }
}

/// Site status filter of the instantaneous values service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    All,
    Active,
    Inactive,
}

impl SiteStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for SiteStatus {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ToolError::invalid(
                "site_status",
                format!("expected `all`, `active` or `inactive`, got `{other}`"),
            )),
        }
    }
}

/// Returns the trimmed value, or `None` when it is missing or blank.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Validates a value that becomes a single path segment.
///
/// `.` and `..` are refused: URL normalisation would drop them and route the
/// call to the parent collection.
///
/// # Errors
/// Returns `InvalidParams` when the value is blank or a dot segment.
pub fn path_value<'a>(field: &'static str, value: &'a str) -> ToolResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid(field, "a non-empty value is required"));
    }
    if matches!(trimmed, "." | "..") {
        return Err(ToolError::invalid(field, format!("`{trimmed}` is not a valid id")));
    }
    Ok(trimmed)
}

/// Validates a comma-separated list of NWIS site numbers.
///
/// # Errors
/// Returns `InvalidParams` when the list is empty or a site is not 8-15 digits.
pub fn sites(value: &str) -> ToolResult<()> {
    let mut count = 0;
    for site in split_list(value) {
        let digits_only = site.bytes().all(|byte| byte.is_ascii_digit());
        if !digits_only || !(SITE_MIN_DIGITS..=SITE_MAX_DIGITS).contains(&site.len()) {
            return Err(ToolError::invalid(
                "sites",
                format!("`{site}` is not a site number ({SITE_MIN_DIGITS}-{SITE_MAX_DIGITS} digits)"),
            ));
        }
        count += 1;
    }
    if count == 0 {
        return Err(ToolError::invalid("sites", "at least one site number is required"));
    }
    Ok(())
}

/// Validates a comma-separated list of 5-digit parameter codes.
///
/// # Errors
/// Returns `InvalidParams` for any code that is not exactly five digits.
pub fn parameter_codes(value: &str) -> ToolResult<()> {
    for code in split_list(value) {
        if code.len() != PARAMETER_CODE_DIGITS || !code.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ToolError::invalid(
                "parameter_codes",
                format!("`{code}` is not a 5-digit parameter code"),
            ));
        }
    }
    Ok(())
}

/// Parses an ISO date or date-time accepted by the instantaneous values service.
///
/// # Errors
/// Returns `InvalidParams` when no supported format matches.
pub fn date_time(field: &'static str, value: &str) -> ToolResult<DateBound> {
    let value = value.trim();
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(DateBound::Local(midnight));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(DateBound::Local(parsed));
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(DateBound::Offset(parsed));
    }
    // RFC 3339 requires seconds; NWIS also takes HH:MM with an offset.
    let padded_zulu = value.strip_suffix('Z').map(|head| format!("{head}+00:00"));
    let candidate = padded_zulu.as_deref().unwrap_or(value);
    if let Ok(parsed) = DateTime::parse_from_str(candidate, OFFSET_DATETIME_FORMAT) {
        return Ok(DateBound::Offset(parsed));
    }
    Err(ToolError::invalid(
        field,
        format!("`{value}` is not YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or an RFC 3339 timestamp"),
    ))
}

/// Validates the time window of an instantaneous values query.
///
/// # Errors
/// Returns `InvalidParams` for unparsable dates, a reversed range, or a
/// `period` combined with explicit dates.
pub fn time_window(
    start_date: Option<&str>,
    end_date: Option<&str>,
    period: Option<&str>,
) -> ToolResult<()> {
    let start = start_date.map(|value| date_time("start_date", value)).transpose()?;
    let end = end_date.map(|value| date_time("end_date", value)).transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start.is_after(&end) == Some(true) {
            return Err(ToolError::invalid("start_date", "start_date is after end_date"));
        }
    }

    if let Some(period) = period {
        iso_duration(period)?;
        if start.is_some() || end.is_some() {
            return Err(ToolError::invalid(
                "period",
                "period cannot be combined with start_date or end_date",
            ));
        }
    }
    Ok(())
}

/// Validates an ISO-8601 duration such as `P7D`, `PT2H` or `P1DT12H`.
///
/// # Errors
/// Returns `InvalidParams` when the value is not a duration.
pub fn iso_duration(value: &str) -> ToolResult<()> {
    let invalid = || {
        ToolError::invalid(
            "period",
            format!("`{value}` is not an ISO-8601 duration (e.g. P7D or PT2H)"),
        )
    };

    let upper = value.trim().to_ascii_uppercase();
    let body = upper.strip_prefix('P').ok_or_else(invalid)?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) if !time.is_empty() => (date, Some(time)),
        Some(_) => return Err(invalid()),
        None => (body, None),
    };

    if date_part.is_empty() && time_part.is_none() {
        return Err(invalid());
    }
    if !duration_part_ok(date_part, "YMWD") {
        return Err(invalid());
    }
    if let Some(time) = time_part {
        if !duration_part_ok(time, "HMS") {
            return Err(invalid());
        }
    }
    Ok(())
}

/// Each designator must follow at least one digit and appear in order, once.
fn duration_part_ok(part: &str, designators: &str) -> bool {
    let mut digits = 0;
    let mut remaining = designators;
    for ch in part.chars() {
        if ch.is_ascii_digit() {
            digits += 1;
            continue;
        }
        if digits == 0 {
            return false;
        }
        match remaining.find(ch) {
            Some(index) => remaining = &remaining[index + ch.len_utf8()..],
            None => return false,
        }
        digits = 0;
    }
    digits == 0
}

/// Validates an OGC bounding box `minx,miny,maxx,maxy` in WGS84 degrees.
///
/// # Errors
/// Returns `InvalidParams` for a malformed, out-of-range, or inverted box.
pub fn bbox(value: &str) -> ToolResult<String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(ToolError::invalid(
            "bbox",
            "expected four comma-separated numbers: minx,miny,maxx,maxy",
        ));
    }

    let mut coords = [0.0_f64; 4];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| ToolError::invalid("bbox", format!("`{part}` is not a number")))?;
    }

    let [min_x, min_y, max_x, max_y] = coords;
    if [min_x, max_x].iter().any(|lon| lon.abs() > 180.0) {
        return Err(ToolError::invalid("bbox", "longitudes must be within -180..180"));
    }
    if [min_y, max_y].iter().any(|lat| lat.abs() > 90.0) {
        return Err(ToolError::invalid("bbox", "latitudes must be within -90..90"));
    }
    if min_x > max_x || min_y > max_y {
        return Err(ToolError::invalid("bbox", "minimum corner must not exceed maximum corner"));
    }
    Ok(parts.join(","))
}

/// Validates a 1-based page number.
///
/// # Errors
/// Returns `InvalidParams` for page 0.
pub fn page(value: u32) -> ToolResult<u32> {
    if value == 0 {
        return Err(ToolError::invalid("page", "pages start at 1"));
    }
    Ok(value)
}

/// Validates a result limit against an optional upper bound.
///
/// # Errors
/// Returns `InvalidParams` for 0 or a limit above `max`.
pub fn limit(value: u32, max: Option<u32>) -> ToolResult<u32> {
    if value == 0 {
        return Err(ToolError::invalid("limit", "limit must be at least 1"));
    }
    if let Some(max) = max.filter(|max| value > *max) {
        return Err(ToolError::invalid("limit", format!("limit must not exceed {max}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_accept_nwis_numbers() {
        assert!(sites("01646500").is_ok());
        assert!(sites("01646500, 01647000").is_ok());
        assert!(sites("394220106431500").is_ok());
    }

    #[test]
    fn sites_reject_empty_and_malformed() {
        assert!(sites("").is_err());
        assert!(sites(" , ").is_err());
        assert!(sites("0164650A").is_err());
        assert!(sites("1234").is_err());
    }

    #[test]
    fn parameter_codes_must_be_five_digits() {
        assert!(parameter_codes("00060,00065").is_ok());
        assert!(parameter_codes("0060").is_err());
        assert!(parameter_codes("00060,discharge").is_err());
    }

    #[test]
    fn dates_accept_supported_formats() {
        assert!(date_time("start_date", "2024-05-01").is_ok());
        assert!(date_time("start_date", "2024-05-01T06:30").is_ok());
        assert!(date_time("start_date", "2024-05-01T06:30:15").is_ok());
        assert!(date_time("start_date", "2024-05-01T06:30:15-05:00").is_ok());
        assert!(date_time("start_date", "05/01/2024").is_err());
    }

    #[test]
    fn offset_timestamps_may_omit_seconds() {
        assert!(matches!(
            date_time("start_date", "2024-05-01T10:00-05:00"),
            Ok(DateBound::Offset(_))
        ));
        assert!(matches!(
            date_time("start_date", "2024-05-01T10:00Z"),
            Ok(DateBound::Offset(_))
        ));
        assert!(time_window(Some("2024-05-01T10:00-05:00"), Some("2024-05-02"), None).is_ok());
    }

    #[test]
    fn mixed_offset_and_local_bounds_are_not_ordered() {
        assert!(time_window(Some("2024-05-01T10:00:00-05:00"), Some("2024-05-01T12:00"), None).is_ok());
        assert!(time_window(Some("2024-05-03"), Some("2024-05-01T12:00:00Z"), None).is_ok());
    }

    #[test]
    fn offset_bounds_compare_as_instants() {
        // 10:00-05:00 is 15:00Z.
        assert!(time_window(Some("2024-05-01T10:00-05:00"), Some("2024-05-01T16:00:00Z"), None).is_ok());
        assert!(time_window(Some("2024-05-01T10:00-05:00"), Some("2024-05-01T14:00:00Z"), None).is_err());
    }

    #[test]
    fn time_window_rejects_reversed_range() {
        let err = time_window(Some("2024-05-02"), Some("2024-05-01"), None)
            .expect_err("reversed range should fail");
        assert_eq!(err.to_string(), "invalid start_date: start_date is after end_date");
    }

    #[test]
    fn time_window_rejects_period_with_dates() {
        assert!(time_window(Some("2024-05-01"), None, Some("P7D")).is_err());
        assert!(time_window(None, None, Some("P7D")).is_ok());
    }

    #[test]
    fn iso_durations() {
        for ok in ["P7D", "PT2H", "P1DT12H", "p30d", "P1Y2M3W4D", "PT15M"] {
            assert!(iso_duration(ok).is_ok(), "{ok} should parse");
        }
        for bad in ["7D", "P", "PT", "P7", "PDT", "P1H", "PT1D", "P1D1D"] {
            assert!(iso_duration(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn bbox_is_normalized_and_bounded() {
        assert_eq!(
            bbox("-77.5, 38.5, -76.5, 39.5").expect("valid bbox"),
            "-77.5,38.5,-76.5,39.5"
        );
        assert!(bbox("-77.5,38.5,-76.5").is_err());
        assert!(bbox("-76.5,38.5,-77.5,39.5").is_err());
        assert!(bbox("-190,38.5,-76.5,39.5").is_err());
        assert!(bbox("a,b,c,d").is_err());
    }

    #[test]
    fn limits_and_pages() {
        assert!(page(0).is_err());
        assert_eq!(page(3).expect("page"), 3);
        assert!(limit(0, None).is_err());
        assert!(limit(OGC_MAX_LIMIT + 1, Some(OGC_MAX_LIMIT)).is_err());
        assert_eq!(limit(500, Some(OGC_MAX_LIMIT)).expect("limit"), 500);
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("RDB".parse::<OutputFormat>().expect("format"), OutputFormat::Rdb);
        assert_eq!("active".parse::<SiteStatus>().expect("status"), SiteStatus::Active);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn path_values_are_trimmed() {
        assert_eq!(path_value("state_id", " TX ").expect("value"), "TX");
        assert!(path_value("state_id", "  ").is_err());
    }

    #[test]
    fn path_values_reject_dot_segments() {
        assert!(path_value("location_id", "..").is_err());
        assert!(path_value("state_id", " . ").is_err());
        assert_eq!(path_value("reference_point_id", "a.b").expect("value"), "a.b");
    }
}
