//! Paste classification.
//!
//! Looks at freshly pasted clipboard text and proposes a block variant for it.
//! A proposal is only ever a suggestion; the editing session asks the user
//! before any block is created.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{BlockType, ListStyle};

/// Headings longer than this are treated as prose
const HEADING_MAX_CHARS: usize = 80;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?[a-z][a-z0-9]*(\s[^<>]*)?/?>").unwrap());
static UNORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+•])\s+(.*)$").unwrap());
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,3}[.)]\s+(.*)$").unwrap());
static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

/// A suggested block for pasted content
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub block_type: BlockType,
    /// Content the new block would receive (markers stripped)
    pub content: String,
    pub detail: ProposalDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalDetail {
    None,
    Code { language: String },
    Heading { level: u8 },
    List { style: ListStyle },
}

/// Best-guess block variant for pasted text, or `None` to paste as plain text
pub fn sniff(text: &str) -> Option<Proposal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if looks_like_html(trimmed) {
        return Some(Proposal {
            block_type: BlockType::Html,
            content: trimmed.to_string(),
            detail: ProposalDetail::None,
        });
    }
    if let Some(language) = looks_like_code(trimmed) {
        return Some(Proposal {
            block_type: BlockType::Code,
            content: text.trim_matches('\n').to_string(),
            detail: ProposalDetail::Code { language },
        });
    }
    if let Some((style, items)) = looks_like_list(trimmed) {
        return Some(Proposal {
            block_type: BlockType::List,
            content: items.join("\n"),
            detail: ProposalDetail::List { style },
        });
    }
    if let Some((level, content)) = looks_like_heading(trimmed) {
        return Some(Proposal {
            block_type: BlockType::Heading,
            content,
            detail: ProposalDetail::Heading { level },
        });
    }
    None
}

fn looks_like_html(text: &str) -> bool {
    if !text.starts_with('<') {
        return false;
    }
    let tags = HTML_TAG.find_iter(text).count();
    tags >= 2 || (tags == 1 && text.ends_with("/>"))
}

/// Returns a language guess when the text reads as source code
fn looks_like_code(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let braces = text.contains('{') && text.contains('}');
    let statement_lines = lines
        .iter()
        .filter(|l| {
            let l = l.trim_end();
            l.ends_with(';') || l.ends_with('{') || l.ends_with('}')
        })
        .count();
    let keyword_hit = [
        "function ", "const ", "let ", "fn ", "def ", "import ", "return ", "=>", "class ",
    ]
    .iter()
    .any(|kw| text.contains(kw));

    let code_like = (braces && (statement_lines >= 2 || keyword_hit))
        || (lines.len() >= 2 && statement_lines * 2 >= lines.len())
        || (text.starts_with("def ") && text.contains("):"));
    if !code_like {
        return None;
    }
    Some(guess_language(text).to_string())
}

fn guess_language(text: &str) -> &'static str {
    if text.contains("fn ") && (text.contains("let ") || text.contains("->")) {
        "rust"
    } else if text.contains("def ") && text.contains("):") {
        "python"
    } else if text.contains("function ") || text.contains("=>") || text.contains("const ") {
        "javascript"
    } else if text.trim_start().starts_with('{') && text.contains("\":") {
        "json"
    } else if text.contains('{') && text.contains(':') && text.contains(';') && !text.contains('(')
    {
        "css"
    } else {
        "plaintext"
    }
}

fn looks_like_list(text: &str) -> Option<(ListStyle, Vec<String>)> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return None;
    }
    for (style, pattern) in [
        (ListStyle::Unordered, &*UNORDERED_MARKER),
        (ListStyle::Ordered, &*ORDERED_MARKER),
    ] {
        let items: Option<Vec<String>> = lines
            .iter()
            .map(|line| {
                pattern
                    .captures(line)
                    .map(|caps| caps[1].trim().to_string())
            })
            .collect();
        if let Some(items) = items {
            return Some((style, items));
        }
    }
    None
}

fn looks_like_heading(text: &str) -> Option<(u8, String)> {
    if text.contains('\n') {
        return None;
    }
    if let Some(caps) = MARKDOWN_HEADING.captures(text) {
        let level = caps[1].len().min(3) as u8;
        return Some((level, caps[2].trim().to_string()));
    }
    let ends_like_sentence = text.ends_with(['.', '!', '?', ':', ';', ',']);
    let short = text.chars().count() <= HEADING_MAX_CHARS;
    let has_words = text.chars().any(char::is_alphabetic);
    if short && has_words && !ends_like_sentence && text.split_whitespace().count() >= 2 {
        Some((2, text.to_string()))
    } else {
        None
    }
}
