//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub data_dir: String,
    pub api: ApiInfo,
    pub session: SessionInfo,
    pub suggestions: SuggestionInfo,
}

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub base_url: String,
    pub request_timeout_sec: u64,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub cookie_max_age_sec: u64,
}

#[derive(Debug, Serialize)]
pub struct SuggestionInfo {
    pub debounce_ms: u64,
}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = crate::core::xdg::XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        data_dir: config.storage.data_dir.to_string_lossy().into_owned(),
        api: ApiInfo {
            base_url: config.api.base_url.clone(),
            request_timeout_sec: config.api.request_timeout_sec,
        },
        session: SessionInfo {
            cookie_max_age_sec: config.session.cookie_max_age_sec,
        },
        suggestions: SuggestionInfo {
            debounce_ms: config.suggestions.debounce_ms,
        },
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  data_dir: {}", response.data_dir);
            println!("  api:");
            println!("    base_url: {}", response.api.base_url);
            println!(
                "    request_timeout_sec: {}",
                response.api.request_timeout_sec
            );
            println!("  session:");
            println!(
                "    cookie_max_age_sec: {}",
                response.session.cookie_max_age_sec
            );
            println!("  suggestions:");
            println!("    debounce_ms: {}", response.suggestions.debounce_ms);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
