//! Navigate command - resolve a page request through the route guard

use crate::cli::output::{colors, print_output};
use crate::cli::OutputFormat;
use crate::core::guard::{resolve_navigation, Navigation};
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the navigate command
#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Requested path, e.g. /search
    #[arg(default_value = "/")]
    pub path: String,
}

/// Resolve `path` against the cookies currently in the jar
pub fn resolve(path: &str, services: &Services) -> Result<Navigation, Box<dyn std::error::Error>> {
    let header = services.session.cookies().header()?;
    Ok(resolve_navigation(path, header.as_deref()))
}

/// Execute the navigate command
pub fn execute(
    args: NavigateArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let navigation = resolve(&args.path, services)?;

    match format {
        OutputFormat::Human => {
            let mut hops = vec![colors::route(&navigation.requested).to_string()];
            hops.extend(
                navigation
                    .redirects
                    .iter()
                    .map(|r| colors::route(r).to_string()),
            );
            println!("{}", hops.join(" -> "));

            if navigation.was_redirected() {
                println!(
                    "Landed on {}",
                    colors::label(&navigation.landed)
                );
            }
        }
        OutputFormat::Json => print_output(&navigation, format),
    }

    Ok(())
}
