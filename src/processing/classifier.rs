//! Decides whether a search result references the target company.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_SIMILARITY_THRESHOLD;
use crate::processing::normalizer::CompanyQuery;
use crate::processing::similarity::ratio;

/// Variation words shorter than this are ignored by per-word scoring.
const MIN_WORD_LEN: usize = 4;

/// How a company hit inside the person's own name affects the decision.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// When the person's name contains the company name, the role segment
    /// itself has to match.
    #[default]
    Strict,
    /// Any role or snippet hit accepts, whatever the name contains.
    Permissive,
}

/// Segment of a result that produced the deciding signal.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchedIn {
    Name,
    Role,
    Snippet,
    None,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct MatchDecision {
    pub accepted: bool,
    pub confidence_score: f64,
    pub matched_in: MatchedIn,
}

impl MatchDecision {
    fn reject(confidence_score: f64, matched_in: MatchedIn) -> Self {
        Self {
            accepted: false,
            confidence_score,
            matched_in,
        }
    }
}

/// Outcome of scanning one candidate text.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Scan {
    hit: bool,
    score: f64,
}

impl Scan {
    fn hit(score: f64) -> Self {
        Self { hit: true, score }
    }
}

/// Classifier bound to a single company.
pub struct MatchClassifier {
    query: CompanyQuery,
    boundaries: Vec<Regex>,
    threshold: f64,
    mode: MatchMode,
}

impl MatchClassifier {
    pub fn new(query: CompanyQuery, threshold: f64, mode: MatchMode) -> Self {
        let boundaries = query
            .variations
            .iter()
            .filter_map(|variation| {
                match Regex::new(&format!(r"\b{}\b", regex::escape(variation))) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        log::warn!("Skipping word-boundary pattern for '{variation}': {e}");
                        None
                    }
                }
            })
            .collect();

        let threshold = if (0.0..=1.0).contains(&threshold) {
            threshold
        } else {
            log::warn!(
                "Similarity threshold {threshold} outside [0, 1]; using {DEFAULT_SIMILARITY_THRESHOLD}"
            );
            DEFAULT_SIMILARITY_THRESHOLD
        };

        Self {
            query,
            boundaries,
            threshold,
            mode,
        }
    }

    pub fn query(&self) -> &CompanyQuery {
        &self.query
    }

    /// Classifies a result from its extracted name, role segment and snippet.
    ///
    /// The name and the role plus snippet are scanned separately. A hit found
    /// only in the person's name never accepts.
    pub fn classify(&self, name: &str, role: &str, snippet: &str) -> MatchDecision {
        let context = format!("{role} {snippet}");
        let context_scan = self.scan(&context);
        let name_scan = self.scan(name);

        if !context_scan.hit {
            if name_scan.hit {
                log::debug!("Company only found in person name '{name}'");
                return MatchDecision::reject(context_scan.score, MatchedIn::Name);
            }
            return MatchDecision::reject(context_scan.score, MatchedIn::None);
        }

        let role_scan = self.scan(role);
        if self.mode == MatchMode::Strict && !role_scan.hit && self.name_contains_company(name) {
            log::debug!("Company in person name '{name}' without role evidence");
            return MatchDecision::reject(context_scan.score, MatchedIn::Name);
        }

        let (confidence_score, matched_in) = if role_scan.hit {
            (role_scan.score, MatchedIn::Role)
        } else {
            (context_scan.score, MatchedIn::Snippet)
        };

        MatchDecision {
            accepted: true,
            confidence_score,
            matched_in,
        }
    }

    /// True when the canonical company name appears verbatim in `name`.
    fn name_contains_company(&self, name: &str) -> bool {
        let company = self.query.canonical_name.to_lowercase();
        !company.is_empty() && name.to_lowercase().contains(&company)
    }

    /// Runs the matching stages over `text`, stopping at the first hit.
    fn scan(&self, text: &str) -> Scan {
        let text = text.to_lowercase();

        if self.boundaries.iter().any(|pattern| pattern.is_match(&text)) {
            return Scan::hit(1.0);
        }

        let in_context = self.query.variations.iter().any(|variation| {
            text.contains(&format!(" at {variation}")) || text.contains(&format!("@ {variation}"))
        });
        if in_context {
            return Scan::hit(1.0);
        }

        if let Some(score) = self.word_similarity(&text) {
            return Scan::hit(score);
        }

        let score = self.window_similarity(&text);
        Scan {
            hit: score >= self.threshold,
            score,
        }
    }

    /// First variation word / text word pair scoring at least the threshold.
    fn word_similarity(&self, text: &str) -> Option<f64> {
        let words: Vec<&str> = text.split_whitespace().collect();

        self.query
            .variations
            .iter()
            .flat_map(|variation| variation.split_whitespace())
            .filter(|company_word| company_word.chars().count() >= MIN_WORD_LEN)
            .find_map(|company_word| {
                words
                    .iter()
                    .map(|word| ratio(company_word, word))
                    .find(|score| *score >= self.threshold)
            })
    }

    /// Best ratio of any variation against equally long slices of `text`.
    fn window_similarity(&self, text: &str) -> f64 {
        let chars: Vec<char> = text.chars().collect();
        let mut best = 0.0_f64;

        for variation in &self.query.variations {
            let width = variation.chars().count();
            if width == 0 || width > chars.len() {
                continue;
            }
            for window in chars.windows(width) {
                let segment: String = window.iter().collect();
                best = best.max(ratio(variation, &segment));
            }
        }

        best
    }
}
