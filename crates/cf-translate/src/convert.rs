//! HTML to markdown conversion for statement fragments
//!
//! Works on parsed [`ElementRef`]s rather than raw markup so callers can
//! hand over exactly the sub-tree they located. Math written as `$...$`
//! (or `$$$...$$$` on Codeforces) is ordinary text and passes through as is.

use scraper::{ElementRef, Node};

/// Elements whose content never reaches the output
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg"];

/// Class of the heading div inside every statement section
const SECTION_TITLE_CLASS: &str = "section-title";

/// Convert the children of `element` to markdown
pub fn element_to_markdown(element: ElementRef<'_>) -> String {
    render(element, &[])
}

/// Convert a statement section to markdown, dropping its "section-title" heading
pub fn section_to_markdown(element: ElementRef<'_>) -> String {
    render(element, &[SECTION_TITLE_CLASS])
}

/// Text of `element` with all whitespace runs collapsed to single spaces
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw text of a preformatted block
///
/// `<br>` and block-level children (Codeforces wraps every sample line in a
/// `div.test-example-line`) become line breaks; everything else is kept
/// verbatim.
pub fn preformatted_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_preformatted(&mut out, element);
    out
}

fn push_preformatted(out: &mut String, element: ElementRef<'_>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let is_block = matches!(el.name(), "div" | "p");
                if is_block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                push_preformatted(out, child_el);
                if is_block && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn render(element: ElementRef<'_>, skip_classes: &[&str]) -> String {
    let mut writer = MarkdownWriter {
        out: String::new(),
        skip_classes,
    };
    writer.children(element);
    tidy_markdown(&writer.out)
}

struct MarkdownWriter<'s> {
    out: String,
    skip_classes: &'s [&'s str],
}

impl MarkdownWriter<'_> {
    fn children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(text),
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.element(el);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, el: ElementRef<'_>) {
        let value = el.value();
        let name = value.name();
        if SKIP_TAGS.contains(&name) || value.classes().any(|c| self.skip_classes.contains(&c)) {
            return;
        }

        match name {
            "br" => self.out.push('\n'),
            "p" => {
                self.ensure_newline();
                self.children(el);
                self.out.push_str("\n\n");
            }
            "pre" => {
                self.ensure_newline();
                self.out.push_str("```\n");
                self.out
                    .push_str(preformatted_text(el).trim_matches(|c| c == '\n' || c == '\r'));
                self.out.push_str("\n```\n\n");
            }
            "ul" | "ol" => {
                self.ensure_newline();
                self.children(el);
                self.ensure_newline();
                self.out.push('\n');
            }
            "div" | "center" => {
                self.ensure_newline();
                self.children(el);
                self.ensure_newline();
            }
            "li" => {
                self.ensure_newline();
                self.out.push_str("- ");
                self.list_item(el);
            }
            "b" | "strong" => self.inline("**", el),
            "i" | "em" => self.inline("*", el),
            "tt" | "code" => self.inline("`", el),
            "span" => match value.classes().find_map(span_marker) {
                Some(marker) => self.inline(marker, el),
                None => self.children(el),
            },
            "img" => {
                if let Some(src) = value.attr("src") {
                    let alt = value.attr("alt").unwrap_or("");
                    self.out.push_str(&format!("![{}]({})", alt, src));
                }
            }
            "a" => match value.attr("href") {
                Some(href) => {
                    self.out.push('[');
                    self.children(el);
                    self.out.push_str(&format!("]({})", href));
                }
                None => self.children(el),
            },
            _ => self.children(el),
        }
    }

    /// Append text, collapsing whitespace runs into one space
    fn text(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                if !self.out.is_empty() && !self.out.ends_with(&[' ', '\n'][..]) {
                    self.out.push(' ');
                }
            } else {
                self.out.push(c);
            }
        }
    }

    /// Render item content so block children start on the bullet line
    fn list_item(&mut self, el: ElementRef<'_>) {
        let start = self.out.len();
        self.children(el);
        let inner = self.out.split_off(start);
        let body = inner
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        self.out.push_str(&body);
        self.out.push('\n');
    }

    /// Wrap the element's content in an emphasis marker, keeping outer spacing
    fn inline(&mut self, marker: &str, el: ElementRef<'_>) {
        let start = self.out.len();
        self.children(el);
        let inner = self.out.split_off(start);
        let trimmed = inner.trim();
        if trimmed.is_empty() {
            self.out.push_str(&inner);
            return;
        }
        if inner.starts_with(char::is_whitespace) {
            self.text(" ");
        }
        self.out.push_str(marker);
        self.out.push_str(trimmed);
        self.out.push_str(marker);
        if inner.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
    }

    fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

/// Markdown marker for Codeforces' TeX font-style spans
fn span_marker(class: &str) -> Option<&'static str> {
    match class {
        "tex-font-style-bf" => Some("**"),
        "tex-font-style-it" | "tex-font-style-sl" => Some("*"),
        "tex-font-style-tt" => Some("`"),
        _ => None,
    }
}

/// Trim lines, keep at most one blank line in a row and leave fenced code untouched
pub fn tidy_markdown(s: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut blank_run = 0;

    for line in s.lines() {
        if line.trim() == "```" {
            in_fence = !in_fence;
            blank_run = 0;
            lines.push("```");
            continue;
        }
        if in_fence {
            lines.push(line.trim_end_matches('\r'));
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn with_root<T>(html: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> T {
        let doc = Html::parse_fragment(&format!("<div id=\"root\">{}</div>", html));
        let selector = Selector::parse("#root").unwrap();
        f(doc.select(&selector).next().unwrap())
    }

    fn convert(html: &str) -> String {
        with_root(html, element_to_markdown)
    }

    #[test]
    fn test_paragraphs_become_blank_line_separated() {
        assert_eq!(
            convert("<p>First paragraph</p><p>Second paragraph</p>"),
            "First paragraph\n\nSecond paragraph"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(convert("line one<br>line two"), "line one\nline two");
    }

    #[test]
    fn test_math_survives_and_whitespace_collapses() {
        assert_eq!(
            convert("<p>Read   \n  $$$n$$$   numbers $a_1, \\ldots, a_n$.</p>"),
            "Read $$$n$$$ numbers $a_1, \\ldots, a_n$."
        );
    }

    #[test]
    fn test_pre_becomes_fenced_code() {
        assert_eq!(
            convert("<p>For example:</p><pre>1 2\n  3 4\n</pre>"),
            "For example:\n\n```\n1 2\n  3 4\n```"
        );
    }

    #[test]
    fn test_section_title_removed() {
        let md = with_root(
            "<div class=\"section-title\">Input</div><p>The only line contains $$$n$$$.</p>",
            section_to_markdown,
        );
        assert_eq!(md, "The only line contains $$$n$$$.");
    }

    #[test]
    fn test_section_title_kept_for_plain_conversion() {
        let md = convert("<div class=\"section-title\">Input</div><p>Text</p>");
        assert_eq!(md, "Input\nText");
    }

    #[test]
    fn test_tex_font_styles() {
        assert_eq!(
            convert(
                "<p>Print <span class=\"tex-font-style-bf\">YES</span> or \
                 <span class=\"tex-font-style-it\"> maybe </span>now.</p>"
            ),
            "Print **YES** or *maybe* now."
        );
    }

    #[test]
    fn test_emphasis_and_code() {
        assert_eq!(
            convert("<p><b>bold</b>, <em>italic</em> and <tt>mono</tt></p>"),
            "**bold**, *italic* and `mono`"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            convert("<ul>\n<li>one</li>\n<li>two</li>\n</ul>"),
            "- one\n- two"
        );
    }

    #[test]
    fn test_list_items_wrapping_paragraphs() {
        assert_eq!(
            convert("<ol><li><p>First step.</p></li><li><p>Second</p><p>continued.</p></li></ol><p>After.</p>"),
            "- First step.\n- Second\ncontinued.\n\nAfter."
        );
    }

    #[test]
    fn test_images_and_links() {
        assert_eq!(
            convert("<p><img src=\"/pic.png\" alt=\"figure\"> see <a href=\"/blog\">blog</a></p>"),
            "![figure](/pic.png) see [blog](/blog)"
        );
    }

    #[test]
    fn test_scripts_dropped_and_entities_decoded() {
        assert_eq!(
            convert("<p>a &lt; b &amp;&amp; c</p><script>alert('x');</script>"),
            "a < b && c"
        );
    }

    #[test]
    fn test_preformatted_text_splits_example_lines() {
        let text = with_root(
            "<pre><div class=\"test-example-line\">3</div>\
             <div class=\"test-example-line\">1 2</div>\
             <div class=\"test-example-line\">5</div></pre>",
            |root| {
                let pre = root
                    .select(&Selector::parse("pre").unwrap())
                    .next()
                    .unwrap();
                preformatted_text(pre)
            },
        );
        assert_eq!(text, "3\n1 2\n5\n");
    }

    #[test]
    fn test_preformatted_text_br() {
        let text = with_root("<pre>1<br>2<br/>3</pre>", |root| {
            let pre = root
                .select(&Selector::parse("pre").unwrap())
                .next()
                .unwrap();
            preformatted_text(pre)
        });
        assert_eq!(text, "1\n2\n3");
    }

    #[test]
    fn test_collapsed_text() {
        let text = with_root("<div class=\"title\">  A.\n  Example   Title </div>", collapsed_text);
        assert_eq!(text, "A. Example Title");
    }

    #[test]
    fn test_tidy_markdown_keeps_fenced_whitespace() {
        let input = "  text  \n\n\n\n```\n  indented\n\n\n```\n\n\nend  ";
        assert_eq!(
            tidy_markdown(input),
            "text\n\n```\n  indented\n\n\n```\n\nend"
        );
    }
}
