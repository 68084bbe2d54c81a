//! Markdown templates for translated and original statements

use crate::types::{Example, ProblemId, ProblemRecord, TranslatedRecord};

/// Headings of one document language
struct Headings {
    description: Option<&'static str>,
    input: &'static str,
    output: &'static str,
    examples: &'static str,
    example_input: &'static str,
    example_output: &'static str,
    note: &'static str,
}

const ZH: Headings = Headings {
    description: Some("## 题目描述"),
    input: "## 输入格式",
    output: "## 输出格式",
    examples: "## 样例",
    example_input: "### 输入",
    example_output: "### 输出",
    note: "## 注意",
};

const EN: Headings = Headings {
    description: None,
    input: "## Input",
    output: "## Output",
    examples: "## Examples",
    example_input: "### Input",
    example_output: "### Output",
    note: "## Note",
};

/// Sections shared by both templates
struct Body<'a> {
    title: &'a str,
    description: &'a str,
    input_section: &'a str,
    output_section: &'a str,
    examples: &'a [Example],
    note: &'a str,
}

/// Render the translated document, front matter included
pub fn render_translated(translated: &TranslatedRecord, id: &ProblemId, author: &str) -> String {
    let mut lines = vec![
        "---".to_string(),
        format!("author: {}", author),
        "---".to_string(),
        String::new(),
    ];
    push_body(
        &mut lines,
        id,
        &ZH,
        &Body {
            title: &translated.title,
            description: &translated.description,
            input_section: &translated.input_section,
            output_section: &translated.output_section,
            examples: &translated.examples,
            note: &translated.note,
        },
    );
    finish(lines)
}

/// Render the original-language document
pub fn render_original(problem: &ProblemRecord, id: &ProblemId) -> String {
    let mut lines = Vec::new();
    push_body(
        &mut lines,
        id,
        &EN,
        &Body {
            title: &problem.title,
            description: &problem.description,
            input_section: &problem.input_section,
            output_section: &problem.output_section,
            examples: &problem.examples,
            note: &problem.note,
        },
    );
    finish(lines)
}

fn push_body(lines: &mut Vec<String>, id: &ProblemId, headings: &Headings, body: &Body<'_>) {
    lines.push(format!("# {}. {}", id.index, body.title));
    lines.push(String::new());
    if let Some(heading) = headings.description {
        lines.push(heading.to_string());
        lines.push(String::new());
    }
    lines.push(body.description.to_string());
    lines.push(String::new());

    push_section(lines, headings.input, body.input_section);
    push_section(lines, headings.output, body.output_section);

    if !body.examples.is_empty() {
        lines.push(headings.examples.to_string());
        let numbered = body.examples.len() > 1;
        for (i, example) in body.examples.iter().enumerate() {
            let suffix = if numbered {
                format!(" {}", i + 1)
            } else {
                String::new()
            };
            lines.push(String::new());
            lines.push(format!("{}{}", headings.example_input, suffix));
            push_code_block(lines, &example.input);
            lines.push(format!("{}{}", headings.example_output, suffix));
            push_code_block(lines, &example.output);
        }
    }

    push_section(lines, headings.note, body.note);
}

fn push_section(lines: &mut Vec<String>, heading: &str, content: &str) {
    if content.is_empty() {
        return;
    }
    lines.push(heading.to_string());
    lines.push(String::new());
    lines.push(content.to_string());
    lines.push(String::new());
}

fn push_code_block(lines: &mut Vec<String>, code: &str) {
    lines.push(String::new());
    lines.push("```".to_string());
    lines.push(code.trim().to_string());
    lines.push("```".to_string());
    lines.push(String::new());
}

fn finish(lines: Vec<String>) -> String {
    let mut doc = lines.join("\n").trim().to_string();
    doc.push('\n');
    doc
}
