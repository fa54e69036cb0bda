//! Status command - show every view of the session

use crate::cli::output::{colors, format_expiry, print_output, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Execute the status command
pub fn execute(
    _args: StatusArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = services.session.status()?;

    match format {
        OutputFormat::Human => {
            let flag = |present: bool| {
                if present {
                    colors::success("present")
                } else {
                    colors::dim("absent")
                }
            };

            println!("{}", colors::label("Session:"));
            println!("  cache:   {}", flag(status.cached));
            println!("  storage: {}", flag(status.durable));
            match &status.cookie_expires_at {
                Some(at) => println!(
                    "  cookie:  {} (expires {})",
                    flag(status.cookie),
                    colors::dim(&format_expiry(at))
                ),
                None => println!("  cookie:  {}", flag(status.cookie)),
            }

            if status.is_divergent() {
                print_warning(
                    "Session views disagree; search may be refused until you log in again",
                );
            }
        }
        OutputFormat::Json => print_output(&status, format),
    }

    Ok(())
}
