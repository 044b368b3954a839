use clap::Parser;

use crate::processing::ExtractionRequest;

#[derive(Debug, Parser)]
#[command(
    name = "profile-harvester",
    about = "Find public profiles of people working at a company"
)]
pub struct Cli {
    /// Company name, legal suffixes allowed (e.g. "Acme Ltd")
    pub company: String,
    /// Region added to the search (default from configuration)
    pub location: Option<String>,
    /// Maximum number of profiles to return
    #[arg(allow_negative_numbers = true)]
    pub limit: Option<i64>,
}

impl From<Cli> for ExtractionRequest {
    fn from(cli: Cli) -> Self {
        Self {
            company: cli.company,
            location: cli.location,
            limit: cli.limit,
        }
    }
}
