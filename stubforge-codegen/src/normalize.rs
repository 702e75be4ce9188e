//! Post-processing of rendered text.
//!
//! Three rewrites turn raw renderer output into the final file:
//!
//! 1. fenced comment blocks (two `//---` lines and everything between,
//!    plus the blank lines after them) are removed;
//! 2. runs of two or more blank lines shrink to a single blank line;
//! 3. a closing-brace line directly followed by a closing-brace line at the
//!    same or a shallower indentation gets one blank line between them.
//!
//! All three are repeated until the text stops changing, since each can
//! expose new work for the others.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*//-+[^\n]*\n(?s:.*?)^[ \t]*//-+[^\n]*(?:\n|\z)(?:[ \t]*\n)*")
        .expect("header pattern should compile")
});

/// Normalize rendered source text. Idempotent; never fails.
///
/// ```
/// let raw = "//----\n// <auto-generated/>\n//----\n\nclass A\n{\n\n\n}\n";
/// assert_eq!(stubforge_codegen::normalize(raw), "class A\n{\n\n}\n");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut current = raw.replace("\r\n", "\n");

    let mut passes = 0usize;
    loop {
        passes += 1;
        let next = space_closing_braces(&collapse_blank_lines(&strip_header(&current)));
        if next == current {
            break;
        }
        current = next;
    }
    tracing::debug!(passes, "normalized rendered text");
    current
}

/// Remove the first fenced header block.
pub(crate) fn strip_header(text: &str) -> Cow<'_, str> {
    HEADER_BLOCK.replace(text, "")
}

/// Shrink every run of blank or whitespace-only lines to one empty line.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    rewrite_lines(text, |lines| {
        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        let mut run = 0usize;
        for line in lines {
            if line.trim().is_empty() {
                run += 1;
                if run == 1 {
                    out.push("");
                }
            } else {
                run = 0;
                out.push(line);
            }
        }
        out
    })
}

/// Separate stacked closing braces with one blank line.
pub(crate) fn space_closing_braces(text: &str) -> String {
    rewrite_lines(text, |lines| {
        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        for (i, &line) in lines.iter().enumerate() {
            if i > 0 {
                let previous = lines[i - 1];
                if is_closing_brace(previous)
                    && is_closing_brace(line)
                    && indentation(line) <= indentation(previous)
                {
                    out.push("");
                }
            }
            out.push(line);
        }
        out
    })
}

/// Apply `f` to the lines of `text`, keeping a trailing newline.
fn rewrite_lines<'a>(text: &'a str, f: impl FnOnce(Vec<&'a str>) -> Vec<&'a str>) -> String {
    let (body, trailing) = match text.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (text, ""),
    };
    if body.is_empty() {
        return text.to_string();
    }
    let mut out = f(body.split('\n').collect()).join("\n");
    out.push_str(trailing);
    out
}

fn is_closing_brace(line: &str) -> bool {
    line.trim() == "}"
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
