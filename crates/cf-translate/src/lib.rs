//! cf-translate - Codeforces statement translation library
//!
//! This crate fetches a Codeforces problem, extracts its statement as
//! markdown, machine-translates it into Chinese and writes both versions
//! into a documentation tree, keeping the problem index pages current.
//!
//! ## Pipeline
//!
//! A [`Pipeline`] wires a [`ProblemFetcher`] to a [`TranslatorChain`] and a
//! [`DocsLayout`]. One run produces:
//! - `docs/zh/problem/<contest>/<INDEX>.md` - translated statement
//! - `docs/en/problem/<contest>/<INDEX>.md` - original statement
//! - one new cell in each `docs/<lang>/problem/index.md`
//!
//! ## Translation backends
//!
//! Built-in backends, tried in order:
//! - [`LibreTranslate`] - community LibreTranslate instance
//! - [`MyMemory`] - MyMemory public API

mod client;
pub mod config;
pub mod convert;
mod error;
pub mod extract;
pub mod fetchers;
pub mod index;
pub mod layout;
mod pipeline;
pub mod render;
pub mod tags;
pub mod translate;
mod types;

pub use config::{load_batch, parse_batch};
pub use error::Error;
pub use extract::parse_problem_html;
pub use fetchers::{fetch_meta_or_default, fetch_problem, CodeforcesFetcher, ProblemFetcher};
pub use index::{update_indices, IndexEntry, SyncOutcome};
pub use layout::{DocLanguage, DocsLayout};
pub use pipeline::{
    BatchSummary, Pipeline, PipelineBuilder, RunOutcome, DEFAULT_AUTHOR, DEFAULT_BATCH_PAUSE,
    DEFAULT_META_PAUSE,
};
pub use render::{render_original, render_translated};
pub use translate::{
    translate_problem, LibreTranslate, MyMemory, TranslationBackend, TranslatorChain,
};
pub use types::{
    normalize_index, Example, ProblemId, ProblemMeta, ProblemRecord, TranslatedRecord,
};

/// Default User-Agent string for API and translation requests
pub const DEFAULT_USER_AGENT: &str = concat!("cf-translate/", env!("CARGO_PKG_VERSION"));
