//! Problem sources
//!
//! Design: everything that talks to the problem site sits behind the
//! [`ProblemFetcher`] trait so the pipeline can be driven by canned
//! responses in tests.

mod codeforces;

pub use codeforces::{CodeforcesFetcher, CODEFORCES_URL};

use crate::error::Error;
use crate::extract::parse_problem_html;
use crate::types::{ProblemId, ProblemMeta, ProblemRecord};
use async_trait::async_trait;
use tracing::warn;

/// Trait for problem sources
#[async_trait]
pub trait ProblemFetcher: Send + Sync {
    /// Unique identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Fetch the raw HTML of a problem page
    async fn fetch_statement(&self, id: &ProblemId) -> Result<String, Error>;

    /// Fetch rating and tags of a problem
    async fn fetch_meta(&self, id: &ProblemId) -> Result<ProblemMeta, Error>;
}

/// Fetch a problem page and extract its statement
///
/// A page without a statement container fails the same way a network
/// error does.
pub async fn fetch_problem(
    fetcher: &dyn ProblemFetcher,
    id: &ProblemId,
) -> Result<ProblemRecord, Error> {
    let html = fetcher.fetch_statement(id).await?;
    parse_problem_html(&html)
}

/// Fetch problem metadata, treating any failure as "unknown rating, no tags"
pub async fn fetch_meta_or_default(fetcher: &dyn ProblemFetcher, id: &ProblemId) -> ProblemMeta {
    match fetcher.fetch_meta(id).await {
        Ok(meta) => meta,
        Err(e) => {
            warn!(problem = %id, fetcher = fetcher.name(), error = %e, "Metadata unavailable");
            ProblemMeta::default()
        }
    }
}
