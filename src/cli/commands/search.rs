//! Search command - explicit customer search

use crate::cli::output::{
    colors, customer_details, print_notice, print_output, print_success, render_highlighted,
};
use crate::cli::OutputFormat;
use crate::core::search::{resolve_kind, QueryKind, SearchOutcome};
use crate::core::services::Services;
use crate::core::types::Customer;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Name, email or account number
    pub query: String,

    /// Force the field to search instead of inferring it from the query
    #[arg(long, value_enum)]
    pub by: Option<QueryKind>,

    /// Expand every customer's balances, pockets and term deposits
    #[arg(long, short = 'd')]
    pub details: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    #[serde(flatten)]
    pub customer: Customer,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub kind: QueryKind,
    pub outcome: SearchOutcome,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = services.search_controller();
    let outcome = controller.submit(&args.query, args.by).await;

    match &outcome {
        SearchOutcome::Invalid { message } | SearchOutcome::Failed { message } => {
            return Err(message.clone().into());
        }
        SearchOutcome::Redirect { to } => {
            return Err(format!(
                "Authentication required. Redirecting to {to}; run 'custlookup login <username>' first."
            )
            .into());
        }
        SearchOutcome::NoResults { .. } | SearchOutcome::Found { .. } => {}
    }

    let views = controller.views();

    match format {
        OutputFormat::Human => match &outcome {
            SearchOutcome::NoResults { message } => print_notice(message),
            SearchOutcome::Found { message, .. } => {
                print_success(message);
                println!();

                for (index, view) in views.iter().enumerate() {
                    println!(
                        "{} {}",
                        colors::rank(&format!("[{}]", index + 1)),
                        colors::label(&render_highlighted(&view.name))
                    );
                    println!("    {}", render_highlighted(&view.email));
                    if let Some(account) = &view.account_number {
                        println!("    Account: {}", render_highlighted(account));
                    }

                    if args.details {
                        if let Some(customer) = controller.toggle_selection(index) {
                            for line in customer_details(customer) {
                                println!("    {}", colors::dim(&line));
                            }
                        }
                    }
                    println!();
                }
            }
            _ => {}
        },
        OutputFormat::Json => {
            let output = SearchResponseOutput {
                query: args.query.clone(),
                kind: resolve_kind(&args.query, args.by),
                outcome,
                results: controller
                    .state()
                    .customers
                    .iter()
                    .enumerate()
                    .map(|(i, c)| SearchResultItem {
                        rank: i + 1,
                        customer: c.clone(),
                    })
                    .collect(),
            };
            print_output(&output, format);
        }
    }

    Ok(())
}
