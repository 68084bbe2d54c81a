//! Paths inside the documentation tree

use crate::types::ProblemId;
use std::path::{Path, PathBuf};

/// Which half of the docs tree a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocLanguage {
    /// Chinese translation, served from the site root
    Translated,
    /// Original English statement, served under `/en`
    Original,
}

impl DocLanguage {
    /// Directory name under `docs/`
    pub fn dir(self) -> &'static str {
        match self {
            DocLanguage::Translated => "zh",
            DocLanguage::Original => "en",
        }
    }

    /// Site path a problem document is linked under
    pub fn link_path(self, id: &ProblemId) -> String {
        let prefix = match self {
            DocLanguage::Translated => "",
            DocLanguage::Original => "/en",
        };
        format!("{}/problem/{}/{}", prefix, id.contest_id, id.index)
    }
}

/// Documentation tree rooted at a repository checkout
#[derive(Debug, Clone)]
pub struct DocsLayout {
    root: PathBuf,
}

impl DocsLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn problem_dir(&self, lang: DocLanguage) -> PathBuf {
        self.root.join("docs").join(lang.dir()).join("problem")
    }

    /// `docs/<lang>/problem/<contest>/<INDEX>.md`
    pub fn problem_path(&self, lang: DocLanguage, id: &ProblemId) -> PathBuf {
        self.problem_dir(lang)
            .join(id.contest_id.to_string())
            .join(format!("{}.md", id.index))
    }

    /// `docs/<lang>/problem/index.md`
    pub fn index_path(&self, lang: DocLanguage) -> PathBuf {
        self.problem_dir(lang).join("index.md")
    }
}
