//! Problem statement extraction
//!
//! Locates the fixed, class-named containers of a Codeforces problem page
//! and turns each of them into markdown.

use crate::convert::{collapsed_text, element_to_markdown, preformatted_text, section_to_markdown};
use crate::error::Error;
use crate::types::{Example, ProblemRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static STATEMENT: LazyLock<Selector> = LazyLock::new(|| selector("div.problem-statement"));
static HEADER: LazyLock<Selector> = LazyLock::new(|| selector("div.header"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("div.title"));
static INPUT_SPEC: LazyLock<Selector> = LazyLock::new(|| selector("div.input-specification"));
static OUTPUT_SPEC: LazyLock<Selector> = LazyLock::new(|| selector("div.output-specification"));
static NOTE: LazyLock<Selector> = LazyLock::new(|| selector("div.note"));
static SAMPLE_INPUTS: LazyLock<Selector> = LazyLock::new(|| selector("div.sample-tests div.input"));
static SAMPLE_OUTPUTS: LazyLock<Selector> =
    LazyLock::new(|| selector("div.sample-tests div.output"));
static PRE: LazyLock<Selector> = LazyLock::new(|| selector("pre"));

/// "A. ", "B1. ", "AA. " in front of a title
static INDEX_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,2}[0-9]?\.\s*").expect("index prefix pattern is valid")
});

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("statement selectors are valid CSS")
}

/// Parse a problem page into a [`ProblemRecord`]
///
/// Returns [`Error::UnrecognizedPage`] when the page has no
/// `div.problem-statement` container. Every other part is optional and
/// comes back empty when missing.
pub fn parse_problem_html(html: &str) -> Result<ProblemRecord, Error> {
    let document = Html::parse_document(html);
    let statement = document
        .select(&STATEMENT)
        .next()
        .ok_or(Error::UnrecognizedPage)?;

    let header = statement.select(&HEADER).next();
    let full_title = header
        .and_then(|h| h.select(&TITLE).next())
        .map(collapsed_text)
        .unwrap_or_default();
    let title = strip_index_prefix(&full_title).to_string();

    let description = header
        .and_then(next_div_sibling)
        .map(element_to_markdown)
        .unwrap_or_default();

    Ok(ProblemRecord {
        title,
        full_title,
        description,
        input_section: section(statement, &INPUT_SPEC),
        output_section: section(statement, &OUTPUT_SPEC),
        examples: parse_examples(statement),
        note: section(statement, &NOTE),
    })
}

/// Strip a leading "A. " style index from a title
pub fn strip_index_prefix(full_title: &str) -> &str {
    match INDEX_PREFIX.find(full_title) {
        Some(m) => &full_title[m.end()..],
        None => full_title,
    }
}

fn next_div_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div")
}

fn section(statement: ElementRef<'_>, selector: &Selector) -> String {
    statement
        .select(selector)
        .next()
        .map(section_to_markdown)
        .unwrap_or_default()
}

/// Pair the i-th sample input block with the i-th sample output block
fn parse_examples(statement: ElementRef<'_>) -> Vec<Example> {
    let inputs = statement.select(&SAMPLE_INPUTS);
    let outputs = statement.select(&SAMPLE_OUTPUTS);
    inputs
        .zip(outputs)
        .map(|(input, output)| Example {
            input: sample_text(input),
            output: sample_text(output),
        })
        .collect()
}

/// Text of the block's `pre`, empty when the block has none
fn sample_text(block: ElementRef<'_>) -> String {
    block
        .select(&PRE)
        .next()
        .map(|pre| preformatted_text(pre).trim().to_string())
        .unwrap_or_default()
}
