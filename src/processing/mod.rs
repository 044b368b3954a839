use serde::Deserialize;
use thiserror::Error;

pub mod classifier;
pub mod dedup;
pub mod extractor;
pub mod normalizer;
pub mod pipeline;
pub mod similarity;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    Validation(String),
}

/// Caller input for one extraction run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ExtractionRequest {
    pub fn new(company: &str, location: Option<&str>, limit: Option<i64>) -> Self {
        Self {
            company: company.to_string(),
            location: location.map(str::to_string),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_json_request() {
        let request: ExtractionRequest =
            serde_json::from_str(r#"{"company":"Acme","limit":3}"#).expect("request");

        assert_eq!(request, ExtractionRequest::new("Acme", None, Some(3)));
    }
}
