use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::utils::text::{grapheme_count, truncate_graphemes};

/// Number of characters kept in a collapsed preview.
pub const PREVIEW_GRAPHEMES: usize = 100;

/// Whether a message is long or structured enough to start collapsed.
///
/// Long text (more than `threshold` characters), fenced code blocks and
/// tables all qualify.
pub fn needs_collapse(content: &str, threshold: usize) -> bool {
    if grapheme_count(content) > threshold {
        return true;
    }
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    Parser::new_ext(content, options).any(|event| {
        matches!(
            event,
            Event::Start(Tag::Table(_)) | Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_)))
        )
    })
}

/// Single-line preview of a collapsed message.
pub fn collapsed_preview(content: &str) -> String {
    let flattened: String = content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = truncate_graphemes(&flattened, PREVIEW_GRAPHEMES);
    if preview.len() < flattened.len() {
        format!("{preview}…")
    } else {
        preview.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_plain_text_stays_expanded() {
        assert!(!needs_collapse("Hello! How can I help?", 1000));
        assert!(!needs_collapse("Use `inline` code freely", 1000));
    }

    #[test]
    fn long_text_collapses() {
        let text = "x".repeat(1001);
        assert!(needs_collapse(&text, 1000));
        assert!(!needs_collapse(&"x".repeat(1000), 1000));
    }

    #[test]
    fn fenced_code_and_tables_collapse() {
        assert!(needs_collapse("Here:\n\n```js\nconsole.log(1)\n```\n", 1000));
        assert!(needs_collapse("| a | b |\n|---|---|\n| 1 | 2 |\n", 1000));
    }

    #[test]
    fn preview_is_bounded_and_grapheme_safe() {
        let text = "é".repeat(300);
        let preview = collapsed_preview(&text);
        assert_eq!(grapheme_count(&preview), PREVIEW_GRAPHEMES + 1);
        assert!(preview.ends_with('…'));
        assert_eq!(collapsed_preview("short\n\nreply"), "short reply");
    }
}
