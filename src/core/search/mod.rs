//! Customer search: classification, highlighting, live suggestions
//! and explicit submission.

mod classify;
pub mod controller;
pub mod highlight;
pub mod suggest;

pub use classify::{classify, resolve_kind, QueryKind};
pub use controller::{CustomerView, SearchController, SearchOutcome, SearchState};
pub use highlight::{highlight, Fragment, Highlighted};
pub use suggest::{Phase, SuggestionPipeline, SuggestionState};
