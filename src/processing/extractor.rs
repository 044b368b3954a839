//! Field extraction from a result title and snippet.

use thiserror::Error;

use crate::domain::profile::{ConnectionLevel, ExperienceBand, ProfileRecord, SearchResult};

/// Location keywords in priority order, matched case-sensitively.
const LOCATION_KEYWORDS: [&str; 8] = [
    "Taiwan",
    "Hong Kong",
    "Singapore",
    "China",
    "Asia",
    "CA",
    "NY",
    "USA",
];

const UNKNOWN_LOCATION: &str = "Unknown";

const SENIOR_MARKERS: [&str; 4] = ["Senior", "Director", "VP", "Chief"];
const MID_MARKERS: [&str; 2] = ["Manager", "Lead"];

const PROFILE_MARKERS: [&str; 2] = ["| LinkedIn", "- LinkedIn"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no person name in title '{0}'")]
    MissingName(String),
}

/// Person name: the title up to the first `" - "` or `" | "`.
pub fn extract_name(title: &str) -> String {
    let end = [" - ", " | "]
        .iter()
        .filter_map(|separator| title.find(separator))
        .min()
        .unwrap_or(title.len());

    let mut name = title[..end].trim();
    while let Some(stripped) = PROFILE_MARKERS
        .iter()
        .find_map(|marker| name.strip_suffix(marker))
    {
        name = stripped.trim_end();
    }
    name.trim().to_string()
}

/// Role segment: after the first `" - "` and before the next `" | "`.
pub fn extract_role(title: &str) -> String {
    match title.split_once(" - ") {
        Some((_, rest)) => rest.split(" | ").next().unwrap_or(rest).trim().to_string(),
        None => String::new(),
    }
}

pub fn extract_location(snippet: &str) -> String {
    LOCATION_KEYWORDS
        .iter()
        .find(|keyword| snippet.contains(*keyword))
        .copied()
        .unwrap_or(UNKNOWN_LOCATION)
        .to_string()
}

pub fn experience_band(title: &str) -> ExperienceBand {
    if SENIOR_MARKERS.iter().any(|marker| title.contains(marker)) {
        ExperienceBand::TenPlus
    } else if MID_MARKERS.iter().any(|marker| title.contains(marker)) {
        ExperienceBand::FivePlus
    } else {
        ExperienceBand::ThreePlus
    }
}

/// Builds a [`ProfileRecord`] for an accepted result.
///
/// `id` is the running index assigned by the pipeline. Results without a
/// recognizable person name fail so the caller can skip them.
pub fn extract(
    result: &SearchResult,
    company: &str,
    id: usize,
    connection_level: ConnectionLevel,
) -> Result<ProfileRecord, ExtractError> {
    let name = extract_name(&result.title);
    if name.is_empty() {
        return Err(ExtractError::MissingName(result.title.clone()));
    }

    Ok(ProfileRecord {
        id: id.to_string(),
        name,
        role_title: extract_role(&result.title),
        profile_url: result.link.clone(),
        full_title: result.title.clone(),
        snippet: result.snippet.clone(),
        location: extract_location(&result.snippet),
        connection_level,
        experience_band: experience_band(&result.title),
        company: company.to_string(),
    })
}
