//! Suggest command - drive the live suggestion pipeline from stdin
//!
//! Every input line is one value of the query field. Lines that arrive
//! faster than the quiet period collapse into a single fetch, exactly
//! as fast typing does.

use crate::cli::output::{colors, format_suggestion, print_output};
use crate::cli::OutputFormat;
use crate::core::search::{Phase, SuggestionPipeline, SuggestionState};
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::time;

/// Arguments for the suggest command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Pause after each input line, simulating typing pace
    #[arg(long, default_value = "0")]
    pub interval_ms: u64,

    /// Override the configured quiet period
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

/// Execute the suggest command
pub async fn execute(
    args: SuggestArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let quiet_period = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| services.config.suggestions.quiet_period());
    let pipeline = SuggestionPipeline::start(Arc::clone(&services.api), quiet_period);

    // Longest a final input can take to settle: its quiet period plus
    // one full request
    let settle_limit =
        quiet_period + services.config.api.request_timeout() + Duration::from_secs(1);

    let stdin = BufReader::new(tokio::io::stdin());
    let interval = Duration::from_millis(args.interval_ms);

    stream(stdin, &pipeline, interval, settle_limit, |state| {
        render(state, format)
    })
    .await?;

    Ok(())
}

/// Feed every line of `input` to `pipeline`, calling `on_render` for
/// each settled dropdown, until the last line's suggestions settle.
///
/// Returns the settled states in order.
pub async fn stream<R, F>(
    input: R,
    pipeline: &SuggestionPipeline,
    interval: Duration,
    settle_limit: Duration,
    mut on_render: F,
) -> Result<Vec<SuggestionState>, Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(&SuggestionState),
{
    let mut state_rx = pipeline.subscribe();
    let mut lines = input.lines();
    let mut renders = Vec::new();
    let mut last_seq = 0;
    let base_rev = state_rx.borrow().input_rev;
    let mut fed: u64 = 0;

    let mut observe = |rx: &mut watch::Receiver<SuggestionState>, renders: &mut Vec<_>| {
        let state = rx.borrow_and_update().clone();
        if is_settled(&state) && state.seq != last_seq {
            last_seq = state.seq;
            on_render(&state);
            renders.push(state);
        }
    };

    loop {
        tokio::select! {
            // Render what settled before feeding the next line
            biased;

            changed = state_rx.changed() => {
                if changed.is_err() {
                    return Ok(renders);
                }
                observe(&mut state_rx, &mut renders);
            }
            line = lines.next_line() => match line? {
                Some(text) => {
                    pipeline.on_input(text);
                    fed += 1;
                    if !interval.is_zero() {
                        time::sleep(interval).await;
                    }
                }
                None => break,
            },
        }
    }

    if fed == 0 {
        return Ok(renders);
    }

    // Drain until the dropdown answers the final input. The pipeline may
    // not have counted it yet.
    let target_rev = base_rev + fed;
    loop {
        observe(&mut state_rx, &mut renders);
        {
            let state = state_rx.borrow();
            if state.is_current() && state.input_rev >= target_rev {
                break;
            }
        }

        match time::timeout(settle_limit, state_rx.changed()).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => break,
            Err(_) => {
                tracing::warn!("Suggestions did not settle within {:?}", settle_limit);
                break;
            }
        }
    }

    Ok(renders)
}

fn is_settled(state: &SuggestionState) -> bool {
    matches!(state.phase, Phase::Rendered | Phase::Cleared)
}

fn render(state: &SuggestionState, format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            let query = state.query.as_deref().unwrap_or("");
            println!("{} {}", colors::label("Suggestions for"), colors::dim(&format!("'{query}'")));
            if state.items.is_empty() {
                println!("  {}", colors::dim("(none)"));
            }
            for (i, item) in state.items.iter().enumerate() {
                println!("  {}", format_suggestion(i + 1, item));
            }
        }
        OutputFormat::Json => print_output(state, format),
    }
}
