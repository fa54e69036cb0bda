//! custlookup CLI - command-line customer lookup client
//!
//! # Examples
//!
//! ```bash
//! # Create an account and log in
//! custlookup register teller --password s3cret --confirm-password s3cret
//! custlookup login teller --password s3cret
//!
//! # Search (kind inferred: email, account number, or name)
//! custlookup search "jane@example.com"
//! custlookup search 10024 --details
//!
//! # Live suggestions, one input value per line
//! printf 'j\nja\njan\n' | custlookup suggest
//!
//! # Where does /search land right now?
//! custlookup navigate /search
//! ```

use clap::Parser;
use custlookup::cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        custlookup::cli::output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
