use std::env;

use clap::Parser;
use profile_harvester::cli::Cli;
use profile_harvester::models::config::{AppConfig, DEFAULT_CONFIG_PATH};
use profile_harvester::processing::ExtractionRequest;
use profile_harvester::processing::pipeline::extract_profiles;
use profile_harvester::repository::ProfileWriter;
use profile_harvester::repository::csv::CsvRepository;
use profile_harvester::search::google::GoogleCustomSearch;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path =
        env::var("PROFILES_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match AppConfig::load(&config_path).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let request = ExtractionRequest::from(cli);
    let company = request.company.trim().to_string();

    let provider = match GoogleCustomSearch::new(config.google()) {
        Ok(provider) => provider,
        Err(e) => {
            log::error!("Failed to create search provider: {e}");
            std::process::exit(1);
        }
    };

    let mut result = match extract_profiles(request, &config.pipeline(), &provider).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    if result.success {
        let repo = CsvRepository::new(&config.export_dir);
        match repo.write_profiles(&company, &result.records) {
            Ok(path) => result.filename = Some(path.display().to_string()),
            Err(e) => log::error!("Failed to export profiles: {e}"),
        }
    }

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize result: {e}"),
    }
}
