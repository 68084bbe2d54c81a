//! Pipeline builder and run controller
//!
//! One run takes a problem from the site to two markdown files and two
//! index entries. Everything happens sequentially; the only timing is the
//! pauses that keep the remote services from throttling us.

use crate::error::Error;
use crate::fetchers::{fetch_meta_or_default, fetch_problem, CodeforcesFetcher, ProblemFetcher};
use crate::index::{update_indices, IndexEntry};
use crate::layout::{DocLanguage, DocsLayout};
use crate::render::{render_original, render_translated};
use crate::translate::{translate_problem, TranslatorChain};
use crate::types::ProblemId;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Author written into the front matter of translated documents
pub const DEFAULT_AUTHOR: &str = "github-actions";

/// Pause after the metadata request (Codeforces API allows one call per ~2s)
pub const DEFAULT_META_PAUSE: Duration = Duration::from_secs(1);

/// Pause between problems of a batch
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_secs(2);

/// Result of processing one problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The translated document already existed and force was off
    Skipped { existing: PathBuf },
    /// Both documents were written
    Written {
        translated: PathBuf,
        original: PathBuf,
    },
}

/// Tally of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: Vec<ProblemId>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed.len()
    }
}

/// Builder for configuring a [`Pipeline`]
pub struct PipelineBuilder {
    repo_root: PathBuf,
    author: String,
    force: bool,
    fetcher: Option<Box<dyn ProblemFetcher>>,
    translator: Option<TranslatorChain>,
    meta_pause: Duration,
    batch_pause: Duration,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Create a builder targeting the current directory with public services
    pub fn new() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            author: DEFAULT_AUTHOR.to_string(),
            force: false,
            fetcher: None,
            translator: None,
            meta_pause: DEFAULT_META_PAUSE,
            batch_pause: DEFAULT_BATCH_PAUSE,
        }
    }

    /// Repository checkout containing `docs/`
    pub fn repo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.repo_root = root.into();
        self
    }

    /// Author for the translated front matter
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Overwrite documents that already exist
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Use a custom problem source
    pub fn fetcher(mut self, fetcher: Box<dyn ProblemFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use a custom translation chain
    pub fn translator(mut self, translator: TranslatorChain) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Pause after fetching metadata
    pub fn meta_pause(mut self, pause: Duration) -> Self {
        self.meta_pause = pause;
        self
    }

    /// Pause between batch items
    pub fn batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            layout: DocsLayout::new(self.repo_root),
            author: self.author,
            force: self.force,
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Box::new(CodeforcesFetcher::new())),
            translator: self.translator.unwrap_or_else(TranslatorChain::with_defaults),
            meta_pause: self.meta_pause,
            batch_pause: self.batch_pause,
        }
    }
}

/// Configured fetch → translate → write pipeline
pub struct Pipeline {
    layout: DocsLayout,
    author: String,
    force: bool,
    fetcher: Box<dyn ProblemFetcher>,
    translator: TranslatorChain,
    meta_pause: Duration,
    batch_pause: Duration,
}

impl Default for Pipeline {
    fn default() -> Self {
        PipelineBuilder::new().build()
    }
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Docs tree this pipeline writes into
    pub fn layout(&self) -> &DocsLayout {
        &self.layout
    }

    /// Process one problem
    ///
    /// Skips (successfully) when the translated document exists and force
    /// is off. Fetch failures are logged and returned; metadata and
    /// translation failures are absorbed.
    pub async fn run(&self, id: &ProblemId) -> Result<RunOutcome, Error> {
        if !id.has_valid_index() {
            let e = Error::InvalidProblemIndex(id.index.clone());
            error!(contest = id.contest_id, error = %e, "Rejected");
            return Err(e);
        }

        let translated_path = self.layout.problem_path(DocLanguage::Translated, id);
        if !self.force && tokio::fs::try_exists(&translated_path).await.unwrap_or(false) {
            info!(
                problem = %id,
                path = %translated_path.display(),
                "Already translated, skipping (use --force to overwrite)"
            );
            return Ok(RunOutcome::Skipped {
                existing: translated_path,
            });
        }

        info!(problem = %id, "Processing");
        match self.process(id, translated_path).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(problem = %id, error = %e, "Failed");
                Err(e)
            }
        }
    }

    async fn process(&self, id: &ProblemId, translated_path: PathBuf) -> Result<RunOutcome, Error> {
        let problem = fetch_problem(&*self.fetcher, id).await?;
        let meta = fetch_meta_or_default(&*self.fetcher, id).await;
        pause(self.meta_pause).await;

        let translated = translate_problem(&self.translator, &problem).await;

        let original_path = self.layout.problem_path(DocLanguage::Original, id);
        write_document(&original_path, &render_original(&problem, id)).await?;

        let entry = IndexEntry {
            id,
            title: &problem.title,
            translated_title: &translated.title,
            meta: &meta,
        };
        update_indices(&self.layout, &entry).await?;

        // The translated document is what marks a problem as done; write it last.
        write_document(
            &translated_path,
            &render_translated(&translated, id, &self.author),
        )
        .await?;

        info!(problem = %id, path = %translated_path.display(), "Saved");
        Ok(RunOutcome::Written {
            translated: translated_path,
            original: original_path,
        })
    }

    /// Process problems in order, pausing between them
    ///
    /// A failing problem never stops the batch.
    pub async fn run_batch(&self, ids: &[ProblemId]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                pause(self.batch_pause).await;
            }
            match self.run(id).await {
                Ok(RunOutcome::Written { .. }) => summary.written += 1,
                Ok(RunOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(_) => summary.failed.push(id.clone()),
            }
        }

        info!(
            total = summary.total(),
            written = summary.written,
            skipped = summary.skipped,
            failed = summary.failed.len(),
            "Batch finished"
        );
        summary
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

async fn write_document(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::io(path, e))
}
