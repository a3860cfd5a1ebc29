use ratatui::{style::Style, text::Span};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Split styled text into alternating whitespace / non-whitespace runs.
fn tokenize(spans: &[Span<'static>]) -> Vec<(String, Style, bool)> {
    let mut tokens = Vec::new();
    for span in spans {
        let mut current = String::new();
        let mut current_is_space = None;
        for ch in span.content.chars() {
            let is_space = ch.is_whitespace();
            if current_is_space.is_some_and(|prev| prev != is_space) {
                tokens.push((
                    std::mem::take(&mut current),
                    span.style,
                    current_is_space.unwrap_or(false),
                ));
            }
            current.push(ch);
            current_is_space = Some(is_space);
        }
        if !current.is_empty() {
            tokens.push((current, span.style, current_is_space.unwrap_or(false)));
        }
    }
    tokens
}

fn trim_trailing_space(line: &mut Vec<Span<'static>>) {
    while let Some(last) = line.last() {
        if last.content.chars().all(char::is_whitespace) {
            line.pop();
        } else {
            break;
        }
    }
}

/// Wrap spans to `max_width` columns, preserving styles and breaking at
/// whitespace. Words wider than the line are hard-broken on grapheme
/// boundaries. Always returns at least one (possibly empty) line.
pub fn wrap_spans(spans: &[Span<'static>], max_width: usize) -> Vec<Vec<Span<'static>>> {
    let max_width = max_width.max(1);
    let mut lines: Vec<Vec<Span<'static>>> = Vec::new();
    let mut line: Vec<Span<'static>> = Vec::new();
    let mut width = 0usize;

    for (text, style, is_space) in tokenize(spans) {
        let token_width = UnicodeWidthStr::width(text.as_str());
        if is_space {
            if width > 0 && width + token_width <= max_width {
                line.push(Span::styled(text, style));
                width += token_width;
            }
            continue;
        }

        if width + token_width <= max_width {
            line.push(Span::styled(text, style));
            width += token_width;
            continue;
        }

        if width > 0 {
            trim_trailing_space(&mut line);
            lines.push(std::mem::take(&mut line));
            width = 0;
        }

        if token_width <= max_width {
            line.push(Span::styled(text, style));
            width = token_width;
            continue;
        }

        let mut chunk = String::new();
        for grapheme in text.graphemes(true) {
            let gw = UnicodeWidthStr::width(grapheme);
            if width + gw > max_width && !chunk.is_empty() {
                line.push(Span::styled(std::mem::take(&mut chunk), style));
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            chunk.push_str(grapheme);
            width += gw;
        }
        if !chunk.is_empty() {
            line.push(Span::styled(chunk, style));
        }
    }

    trim_trailing_space(&mut line);
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn line_width(spans: &[Span<'_>]) -> usize {
    spans
        .iter()
        .map(|span| UnicodeWidthStr::width(span.content.as_ref()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn plain(lines: &[Vec<Span<'static>>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn wrap_splits_at_spaces() {
        let spans = vec![Span::raw("word boundary test")];
        let wrapped = wrap_spans(&spans, 6);
        assert_eq!(plain(&wrapped), vec!["word", "bounda", "ry", "test"]);
    }

    #[test]
    fn styles_survive_wrapping() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let spans = vec![Span::raw("plain "), Span::styled("strong words", bold)];
        let wrapped = wrap_spans(&spans, 12);
        assert_eq!(plain(&wrapped), vec!["plain strong", "words"]);
        assert_eq!(wrapped[1][0].style, bold);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let wrapped = wrap_spans(&[], 10);
        assert_eq!(wrapped.len(), 1);
        assert!(wrapped[0].is_empty());
    }

    #[test]
    fn lines_never_exceed_width() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod";
        for width in 3..30 {
            for line in wrap_spans(&[Span::raw(text)], width) {
                assert!(line_width(&line) <= width, "width {width}");
            }
        }
    }
}
