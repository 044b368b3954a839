//! Helpers for integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use profile_harvester::domain::profile::SearchResult;
use profile_harvester::search::SearchProvider;

/// Provider replaying canned results and recording every query it receives.
#[derive(Default)]
pub struct ScriptedProvider {
    responses: HashMap<usize, Vec<SearchResult>>,
    panic_on: Option<usize>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results returned for the `call`-th query (zero based).
    pub fn respond(mut self, call: usize, results: Vec<SearchResult>) -> Self {
        self.responses.insert(call, results);
        self
    }

    /// Makes the `call`-th query panic instead of returning.
    pub fn panic_on(mut self, call: usize) -> Self {
        self.panic_on = Some(call);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries mutex poisoned").clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let call = {
            let mut queries = self.queries.lock().expect("queries mutex poisoned");
            queries.push(query.to_string());
            queries.len() - 1
        };
        if self.panic_on == Some(call) {
            panic!("provider exploded on call {call}");
        }
        self.responses
            .get(&call)
            .map(|results| results.iter().take(max_results).cloned().collect())
            .unwrap_or_default()
    }
}

pub fn result(link: &str, title: &str, snippet: &str) -> SearchResult {
    SearchResult::new(link, title, snippet)
}

pub fn profile(slug: &str, title: &str, snippet: &str) -> SearchResult {
    result(&format!("https://www.linkedin.com/in/{slug}"), title, snippet)
}
