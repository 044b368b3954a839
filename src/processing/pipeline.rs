//! End-to-end extraction run: validates the request, issues the search
//! queries, classifies and extracts each result, then deduplicates.
//!
//! Provider failures and panics never escape [`extract_profiles`]; they are
//! logged and folded into the returned [`ExtractionResult`].

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_SIMILARITY_THRESHOLD;
use crate::domain::profile::{ConnectionLevel, ExtractionResult, ProfileRecord, SearchResult};
use crate::processing::classifier::{MatchClassifier, MatchMode};
use crate::processing::dedup::dedupe;
use crate::processing::extractor::{extract, extract_name, extract_role};
use crate::processing::normalizer::CompanyQuery;
use crate::processing::{ExtractionRequest, PipelineError};
use crate::search::{MAX_PAGE_SIZE, SearchProvider};

/// Roles searched one by one by [`QueryStrategy::RoleSweep`], most senior first.
pub const SWEEP_ROLES: [&str; 10] = [
    "Chief Executive Officer",
    "Chief Technology Officer",
    "Chief Financial Officer",
    "Chief Operating Officer",
    "Managing Director",
    "Director",
    "Vice President",
    "Head",
    "Manager",
    "Partner",
];

/// Link fragments that mark directory, company or post pages.
const NON_PROFILE_PATHS: [&str; 3] = ["/pub/dir/", "/company/", "/posts/"];

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryStrategy {
    /// One query for the canonical name and location.
    #[default]
    Broad,
    /// One query per entry of [`SWEEP_ROLES`].
    RoleSweep,
}

/// Per-run settings, passed explicitly to [`extract_profiles`].
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub profile_domain: String,
    pub default_location: String,
    pub default_limit: usize,
    pub page_size: usize,
    pub similarity_threshold: f64,
    pub match_mode: MatchMode,
    pub query_strategy: QueryStrategy,
    /// Abort the run when the first query comes back empty.
    pub stop_on_empty_first_query: bool,
    pub connection_level: ConnectionLevel,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            profile_domain: "linkedin.com".to_string(),
            default_location: "Hong Kong".to_string(),
            default_limit: 10,
            page_size: MAX_PAGE_SIZE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            match_mode: MatchMode::default(),
            query_strategy: QueryStrategy::default(),
            stop_on_empty_first_query: true,
            connection_level: ConnectionLevel::default(),
        }
    }
}

/// True for individual profile links, case-insensitively.
pub fn is_profile_url(link: &str) -> bool {
    let link = link.to_lowercase();
    link.contains("/in/") && !NON_PROFILE_PATHS.iter().any(|path| link.contains(path))
}

/// Search queries for `company`, in the order they are issued.
pub fn build_queries(
    strategy: QueryStrategy,
    profile_domain: &str,
    company: &CompanyQuery,
    location: &str,
) -> Vec<String> {
    let site = format!("site:{profile_domain}/in/");
    match strategy {
        QueryStrategy::Broad => {
            vec![join_terms(&[
                site.as_str(),
                format!("\"{}\"", company.canonical_name).as_str(),
                location,
            ])]
        }
        QueryStrategy::RoleSweep => SWEEP_ROLES
            .iter()
            .map(|role| {
                join_terms(&[
                    site.as_str(),
                    format!("\"{}\"", company.raw_name).as_str(),
                    location,
                    format!("\"{role}\"").as_str(),
                ])
            })
            .collect(),
    }
}

fn join_terms(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validated form of an [`ExtractionRequest`].
struct RunInput {
    company: String,
    location: String,
    limit: usize,
}

fn validate(
    request: ExtractionRequest,
    config: &PipelineConfig,
) -> Result<RunInput, PipelineError> {
    let company = request.company.trim().to_string();
    if company.is_empty() {
        return Err(PipelineError::Validation("company is required".to_string()));
    }

    let limit = match request.limit {
        None => config.default_limit,
        Some(limit) => usize::try_from(limit).map_err(|_| {
            PipelineError::Validation(format!("limit must be non-negative, got {limit}"))
        })?,
    };

    let location = request
        .location
        .map(|location| location.trim().to_string())
        .filter(|location| !location.is_empty())
        .unwrap_or_else(|| config.default_location.clone());

    Ok(RunInput {
        company,
        location,
        limit,
    })
}

/// Searches for people working at the requested company.
///
/// Invalid requests are rejected before any provider call. Everything else,
/// including an unexpected panic during the run, is reported through the
/// returned [`ExtractionResult`].
pub async fn extract_profiles<P>(
    request: ExtractionRequest,
    config: &PipelineConfig,
    provider: &P,
) -> Result<ExtractionResult, PipelineError>
where
    P: SearchProvider + ?Sized,
{
    let input = validate(request, config)?;
    log::info!(
        "Starting profile extraction for {} in {} (limit {})",
        input.company,
        input.location,
        input.limit
    );

    if input.limit == 0 {
        return Ok(ExtractionResult::from_records(vec![]));
    }

    let run = AssertUnwindSafe(collect_profiles(&input, config, provider))
        .catch_unwind()
        .await;

    let result = match run {
        Ok(records) => ExtractionResult::from_records(records),
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            log::error!("Profile extraction for {} failed: {message}", input.company);
            ExtractionResult::failure(message)
        }
    };

    log::info!(
        "Finished profile extraction for {}: {} profiles",
        input.company,
        result.count
    );
    Ok(result)
}

async fn collect_profiles<P>(
    input: &RunInput,
    config: &PipelineConfig,
    provider: &P,
) -> Vec<ProfileRecord>
where
    P: SearchProvider + ?Sized,
{
    let classifier = MatchClassifier::new(
        CompanyQuery::new(&input.company),
        config.similarity_threshold,
        config.match_mode,
    );
    log::debug!("Company variations: {:?}", classifier.query().variations);

    let queries = build_queries(
        config.query_strategy,
        &config.profile_domain,
        classifier.query(),
        &input.location,
    );

    let mut accepted: Vec<ProfileRecord> = Vec::new();
    for (index, query) in queries.iter().enumerate() {
        if accepted.len() >= input.limit {
            break;
        }

        log::info!("Searching: {query}");
        let results = provider.search(query, config.page_size).await;
        if results.is_empty() {
            if index == 0 && config.stop_on_empty_first_query {
                log::warn!("First query returned no results, stopping");
                break;
            }
            continue;
        }

        for result in &results {
            if accepted.len() >= input.limit {
                break;
            }
            let id = accepted.len() + 1;
            if let Some(record) = process_result(result, &classifier, config, id) {
                log::info!("Accepted {} - {}", record.name, record.role_title);
                accepted.push(record);
            }
        }
    }

    let total = accepted.len();
    let unique = dedupe(accepted, input.limit);
    log::info!("Accepted {total} profiles, {} unique", unique.len());
    unique
}

/// Filters, classifies and extracts a single result.
fn process_result(
    result: &SearchResult,
    classifier: &MatchClassifier,
    config: &PipelineConfig,
    id: usize,
) -> Option<ProfileRecord> {
    if !is_profile_url(&result.link) {
        log::debug!("Rejected {}: not an individual profile", result.link);
        return None;
    }

    let name = extract_name(&result.title);
    let role = extract_role(&result.title);
    let decision = classifier.classify(&name, &role, &result.snippet);
    log::debug!(
        "Decision for {:?}: accepted={} score={:.2} matched_in={:?}",
        result.title,
        decision.accepted,
        decision.confidence_score,
        decision.matched_in
    );
    if !decision.accepted {
        return None;
    }

    match extract(
        result,
        &classifier.query().raw_name,
        id,
        config.connection_level,
    ) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("Skipping {}: {e}", result.link);
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected failure during extraction".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_url_filter() {
        assert!(is_profile_url("https://linkedin.com/in/janedoe"));
        assert!(is_profile_url("https://HK.LinkedIn.com/IN/janedoe"));
        assert!(!is_profile_url("https://linkedin.com/company/acme"));
        assert!(!is_profile_url("https://linkedin.com/in/janedoe/posts/1"));
        assert!(!is_profile_url("https://linkedin.com/pub/dir/jane/doe"));
        assert!(!is_profile_url("https://linkedin.com/Company/acme/in/x"));
        assert!(!is_profile_url("https://example.com/janedoe"));
    }

    #[test]
    fn broad_query_uses_canonical_name() {
        let queries = build_queries(
            QueryStrategy::Broad,
            "linkedin.com",
            &CompanyQuery::new("Acme Ltd"),
            "Hong Kong",
        );

        assert_eq!(queries, vec!["site:linkedin.com/in/ \"Acme\" Hong Kong"]);
    }

    #[test]
    fn role_sweep_issues_one_query_per_role() {
        let queries = build_queries(
            QueryStrategy::RoleSweep,
            "linkedin.com",
            &CompanyQuery::new("Acme Ltd"),
            "Asia",
        );

        assert_eq!(queries.len(), SWEEP_ROLES.len());
        assert_eq!(
            queries[0],
            "site:linkedin.com/in/ \"Acme Ltd\" Asia \"Chief Executive Officer\""
        );
        assert_eq!(
            queries[9],
            "site:linkedin.com/in/ \"Acme Ltd\" Asia \"Partner\""
        );
    }

    #[test]
    fn empty_location_is_left_out() {
        let queries = build_queries(
            QueryStrategy::Broad,
            "linkedin.com",
            &CompanyQuery::new("Acme"),
            " ",
        );

        assert_eq!(queries, vec!["site:linkedin.com/in/ \"Acme\""]);
    }

    #[test]
    fn validate_applies_defaults() {
        let config = PipelineConfig::default();

        let input = validate(ExtractionRequest::new(" Acme ", Some(""), None), &config)
            .expect("valid request");

        assert_eq!(input.company, "Acme");
        assert_eq!(input.location, "Hong Kong");
        assert_eq!(input.limit, 10);
    }

    #[test]
    fn validate_rejects_blank_company_and_negative_limit() {
        let config = PipelineConfig::default();

        assert!(validate(ExtractionRequest::new("  ", None, None), &config).is_err());
        assert!(validate(ExtractionRequest::new("Acme", None, Some(-1)), &config).is_err());
    }

    #[test]
    fn panic_payloads_become_messages() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
