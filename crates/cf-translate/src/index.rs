//! Index maintenance
//!
//! An index file holds one `## {contest}` section per contest. Each section
//! is a blank line followed by a single-row table with one column per
//! problem:
//!
//! ```text
//! ## 1850
//!
//! |A [800]|B [800]|
//! |:-:|:-:|
//! |[Title](/problem/1850/A)|[Other](/problem/1850/B)|
//! ```
//!
//! Matching is line-oriented and relies on that exact shape, which every
//! write below preserves.

use crate::error::Error;
use crate::layout::{DocLanguage, DocsLayout};
use crate::tags::tags_to_chinese;
use crate::types::{ProblemId, ProblemMeta};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of inserting an entry into index text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexUpdate {
    /// The problem is already linked; nothing to do
    AlreadyPresent,
    /// A new contest section was appended
    AddedSection(String),
    /// The existing contest table gained a column
    WidenedSection(String),
    /// The contest header exists but its table is not in the expected shape
    Unrecognized,
}

/// What happened to one index file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    MissingFile,
    AlreadyPresent,
    AddedSection,
    WidenedSection,
    Unrecognized,
}

/// Everything needed to list one problem in both indices
#[derive(Debug, Clone)]
pub struct IndexEntry<'a> {
    pub id: &'a ProblemId,
    pub title: &'a str,
    pub translated_title: &'a str,
    pub meta: &'a ProblemMeta,
}

impl IndexEntry<'_> {
    /// Table cell for the translated index
    pub fn translated_cell(&self) -> String {
        let link = DocLanguage::Translated.link_path(self.id);
        let mut cell = format!(
            "[{} \\| {}]({})",
            escape_cell(self.title),
            escape_cell(self.translated_title),
            link
        );
        if !self.meta.tags.is_empty() {
            cell.push_str(&format!("（{}）", tags_to_chinese(&self.meta.tags)));
        }
        cell
    }

    /// Table cell for the original-language index
    pub fn original_cell(&self) -> String {
        let link = DocLanguage::Original.link_path(self.id);
        let mut cell = format!("[{}]({})", escape_cell(self.title), link);
        if !self.meta.tags.is_empty() {
            cell.push_str(&format!(" ({})", self.meta.tags.join(", ")));
        }
        cell
    }

    fn cell(&self, lang: DocLanguage) -> String {
        match lang {
            DocLanguage::Translated => self.translated_cell(),
            DocLanguage::Original => self.original_cell(),
        }
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Insert a problem cell into index text
///
/// `link_path` is the site path the cell links to; its presence anywhere in
/// the document means the problem is already listed.
pub fn insert_entry(
    content: &str,
    contest_id: u32,
    index: &str,
    rating: &str,
    link_path: &str,
    cell: &str,
) -> IndexUpdate {
    if content.contains(&format!("({})", link_path)) {
        return IndexUpdate::AlreadyPresent;
    }

    let header = format!("## {}", contest_id);
    let column = format!("{} [{}]", index, rating);
    let lines: Vec<&str> = content.split('\n').collect();

    let Some(pos) = lines.iter().position(|line| line.trim_end() == header) else {
        let mut out = content.trim_end().to_string();
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&format!("{}\n\n|{}|\n|:-:|\n|{}|\n", header, column, cell));
        return IndexUpdate::AddedSection(out);
    };

    match lines.get(pos + 1..pos + 5) {
        Some([blank, head, separator, row])
            if blank.trim().is_empty()
                && [head, separator, row]
                    .iter()
                    .all(|line| line.trim_start().starts_with('|')) =>
        {
            let widened = [
                append_cell(head, &column),
                append_cell(separator, ":-:"),
                append_cell(row, cell),
            ];
            let mut out: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
            for (offset, line) in widened.into_iter().enumerate() {
                out[pos + 2 + offset] = line;
            }
            IndexUpdate::WidenedSection(out.join("\n"))
        }
        _ => IndexUpdate::Unrecognized,
    }
}

/// Append one cell to a `|a|b|` table row
fn append_cell(line: &str, cell: &str) -> String {
    let trimmed = line.trim_end();
    let base = trimmed.strip_suffix('|').unwrap_or(trimmed);
    format!("{}|{}|", base, cell)
}

/// Insert an entry into one index file in place
///
/// A missing file is not an error: index maintenance is best-effort.
pub async fn sync_index_file(
    path: &Path,
    entry: &IndexEntry<'_>,
    lang: DocLanguage,
) -> Result<SyncOutcome, Error> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Index file missing, skipping");
            return Ok(SyncOutcome::MissingFile);
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let update = insert_entry(
        &content,
        entry.id.contest_id,
        &entry.id.index,
        &entry.meta.rating_label(),
        &lang.link_path(entry.id),
        &entry.cell(lang),
    );

    let (outcome, new_content) = match update {
        IndexUpdate::AlreadyPresent => return Ok(SyncOutcome::AlreadyPresent),
        IndexUpdate::Unrecognized => {
            warn!(
                path = %path.display(),
                contest = entry.id.contest_id,
                "Contest section exists but its table has an unexpected shape; index left unchanged"
            );
            return Ok(SyncOutcome::Unrecognized);
        }
        IndexUpdate::AddedSection(text) => (SyncOutcome::AddedSection, text),
        IndexUpdate::WidenedSection(text) => (SyncOutcome::WidenedSection, text),
    };

    tokio::fs::write(path, new_content)
        .await
        .map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), problem = %entry.id, outcome = ?outcome, "Index updated");
    Ok(outcome)
}

/// Update both the translated and the original index
pub async fn update_indices(
    layout: &DocsLayout,
    entry: &IndexEntry<'_>,
) -> Result<[SyncOutcome; 2], Error> {
    let translated = sync_index_file(
        &layout.index_path(DocLanguage::Translated),
        entry,
        DocLanguage::Translated,
    )
    .await?;
    let original = sync_index_file(
        &layout.index_path(DocLanguage::Original),
        entry,
        DocLanguage::Original,
    )
    .await?;
    Ok([translated, original])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(content: &str, contest: u32, index: &str, cell: &str) -> IndexUpdate {
        let link = format!("/problem/{}/{}", contest, index);
        insert_entry(content, contest, index, "800", &link, cell)
    }

    #[test]
    fn test_adds_new_section() {
        let update = insert("# Problems\n", 1850, "A", "[Sum](/problem/1850/A)");
        assert_eq!(
            update,
            IndexUpdate::AddedSection(
                "# Problems\n\n## 1850\n\n|A [800]|\n|:-:|\n|[Sum](/problem/1850/A)|\n".to_string()
            )
        );
    }

    #[test]
    fn test_adds_section_to_empty_file() {
        let update = insert("", 1, "A", "[X](/problem/1/A)");
        assert_eq!(
            update,
            IndexUpdate::AddedSection("## 1\n\n|A [800]|\n|:-:|\n|[X](/problem/1/A)|\n".to_string())
        );
    }

    #[test]
    fn test_widens_existing_section() {
        let content = "# Problems\n\n## 1850\n\n|A [800]|\n|:-:|\n|[Sum](/problem/1850/A)|\n\n## 1900\n\n|A [?]|\n|:-:|\n|[Y](/problem/1900/A)|\n";
        let update = insert(content, 1850, "B", "[Max](/problem/1850/B)");
        assert_eq!(
            update,
            IndexUpdate::WidenedSection(
                "# Problems\n\n## 1850\n\n|A [800]|B [800]|\n|:-:|:-:|\n|[Sum](/problem/1850/A)|[Max](/problem/1850/B)|\n\n## 1900\n\n|A [?]|\n|:-:|\n|[Y](/problem/1900/A)|\n"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_existing_entry_is_left_alone() {
        let content = "## 1850\n\n|A [800]|\n|:-:|\n|[Sum](/problem/1850/A)|\n";
        assert_eq!(
            insert(content, 1850, "A", "[Sum](/problem/1850/A)"),
            IndexUpdate::AlreadyPresent
        );
    }

    #[test]
    fn test_similar_links_are_distinct() {
        let content = "## 1850\n\n|A1 [800]|\n|:-:|\n|[Easy](/problem/1850/A1)|\n";
        assert!(matches!(
            insert(content, 1850, "A", "[Sum](/problem/1850/A)"),
            IndexUpdate::WidenedSection(_)
        ));
    }

    #[test]
    fn test_contest_header_matches_whole_line() {
        let content = "## 12\n\n|A [800]|\n|:-:|\n|[X](/problem/12/A)|\n";
        match insert(content, 1, "A", "[Y](/problem/1/A)") {
            IndexUpdate::AddedSection(text) => {
                assert!(text.starts_with(content.trim_end()));
                assert!(text.ends_with("\n\n## 1\n\n|A [800]|\n|:-:|\n|[Y](/problem/1/A)|\n"));
            }
            other => panic!("expected a new section, got {:?}", other),
        }
    }

    #[test]
    fn test_reformatted_table_is_unrecognized() {
        let content = "## 1850\n\n\n|A [800]|\n|:-:|\n|[Sum](/problem/1850/A)|\n";
        assert_eq!(
            insert(content, 1850, "B", "[Max](/problem/1850/B)"),
            IndexUpdate::Unrecognized
        );
        assert_eq!(
            insert("## 1850\n", 1850, "B", "[Max](/problem/1850/B)"),
            IndexUpdate::Unrecognized
        );
    }

    #[test]
    fn test_append_cell() {
        assert_eq!(append_cell("|A [800]|", "B [900]"), "|A [800]|B [900]|");
        assert_eq!(append_cell("|:-:|  ", ":-:"), "|:-:|:-:|");
        assert_eq!(append_cell("|A", "B"), "|A|B|");
    }

    #[test]
    fn test_cells() {
        let id = ProblemId::new(4, "A");
        let meta = ProblemMeta {
            rating: Some(800),
            tags: vec!["brute force".to_string(), "math".to_string()],
        };
        let entry = IndexEntry {
            id: &id,
            title: "Watermelon",
            translated_title: "西瓜",
            meta: &meta,
        };
        assert_eq!(
            entry.translated_cell(),
            "[Watermelon \\| 西瓜](/problem/4/A)（暴力，数学）"
        );
        assert_eq!(
            entry.original_cell(),
            "[Watermelon](/en/problem/4/A) (brute force, math)"
        );
    }

    #[test]
    fn test_cells_escape_pipes_and_skip_empty_tags() {
        let id = ProblemId::new(4, "A");
        let meta = ProblemMeta::default();
        let entry = IndexEntry {
            id: &id,
            title: "a|b",
            translated_title: "甲|乙",
            meta: &meta,
        };
        assert_eq!(entry.translated_cell(), "[a\\|b \\| 甲\\|乙](/problem/4/A)");
        assert_eq!(entry.original_cell(), "[a\\|b](/en/problem/4/A)");
    }

    #[tokio::test]
    async fn test_sync_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let id = ProblemId::new(4, "A");
        let meta = ProblemMeta::default();
        let entry = IndexEntry {
            id: &id,
            title: "Watermelon",
            translated_title: "西瓜",
            meta: &meta,
        };
        let outcome = sync_index_file(
            &dir.path().join("index.md"),
            &entry,
            DocLanguage::Translated,
        )
        .await
        .unwrap();
        assert_eq!(outcome, SyncOutcome::MissingFile);
        assert!(!dir.path().join("index.md").exists());
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.md");
        std::fs::write(&path, "# 题目\n").unwrap();

        let id = ProblemId::new(4, "A");
        let meta = ProblemMeta::default();
        let entry = IndexEntry {
            id: &id,
            title: "Watermelon",
            translated_title: "西瓜",
            meta: &meta,
        };

        let first = sync_index_file(&path, &entry, DocLanguage::Translated)
            .await
            .unwrap();
        let after_first = std::fs::read_to_string(&path).unwrap();
        let second = sync_index_file(&path, &entry, DocLanguage::Translated)
            .await
            .unwrap();

        assert_eq!(first, SyncOutcome::AddedSection);
        assert_eq!(second, SyncOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
        assert_eq!(
            after_first,
            "# 题目\n\n## 4\n\n|A [?]|\n|:-:|\n|[Watermelon \\| 西瓜](/problem/4/A)|\n"
        );
    }
}
