use std::fmt;

use serde::{Deserialize, Serialize};

/// A single organic result returned by a search provider.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchResult {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    pub fn new(link: &str, title: &str, snippet: &str) -> Self {
        Self {
            link: link.to_string(),
            title: title.to_string(),
            snippet: snippet.to_string(),
        }
    }
}

/// Connection degree shown next to a profile.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ConnectionLevel {
    #[serde(rename = "1st")]
    First,
    #[default]
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl ConnectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionLevel::First => "1st",
            ConnectionLevel::Second => "2nd",
            ConnectionLevel::Third => "3rd",
        }
    }
}

impl fmt::Display for ConnectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority bucket inferred from the result title.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ExperienceBand {
    #[serde(rename = "3+ years")]
    ThreePlus,
    #[serde(rename = "5+ years")]
    FivePlus,
    #[serde(rename = "10+ years")]
    TenPlus,
}

impl ExperienceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceBand::ThreePlus => "3+ years",
            ExperienceBand::FivePlus => "5+ years",
            ExperienceBand::TenPlus => "10+ years",
        }
    }
}

impl fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person extracted from an accepted search result.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub role_title: String,
    pub profile_url: String,
    pub full_title: String,
    pub snippet: String,
    pub location: String,
    pub connection_level: ConnectionLevel,
    pub experience_band: ExperienceBand,
    pub company: String,
}

impl ProfileRecord {
    /// Identity used when collapsing duplicates.
    pub fn identity(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Terminal output of one extraction run.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExtractionResult {
    pub success: bool,
    pub records: Vec<ProfileRecord>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Where the records were exported, once they have been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl ExtractionResult {
    pub const NO_PROFILES: &'static str = "no profiles found";

    /// Wraps deduplicated records, flagging an empty run as a failure.
    pub fn from_records(records: Vec<ProfileRecord>) -> Self {
        let count = records.len();
        let success = count > 0;
        Self {
            success,
            records,
            count,
            error: (!success).then(|| Self::NO_PROFILES.to_string()),
            filename: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            records: vec![],
            count: 0,
            error: Some(error.into()),
            filename: None,
        }
    }
}
