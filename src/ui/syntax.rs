use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::ui::theme::Theme;

const CACHE_CAPACITY: usize = 64;

// Bounded FIFO of highlighted blocks keyed by (language, code, palette).
struct HighlightCache {
    map: HashMap<u64, Vec<Line<'static>>>,
    order: VecDeque<u64>,
}

impl HighlightCache {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: u64) -> Option<Vec<Line<'static>>> {
        self.map.get(&key).cloned()
    }

    fn put(&mut self, key: u64, lines: Vec<Line<'static>>) {
        if self.map.insert(key, lines).is_none() {
            self.order.push_back(key);
        }
        while self.map.len() > CACHE_CAPACITY {
            match self.order.pop_front() {
                Some(old) => {
                    self.map.remove(&old);
                }
                None => break,
            }
        }
    }
}

static CACHE: Mutex<Option<HighlightCache>> = Mutex::new(None);

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

pub(crate) fn normalize_lang_hint(hint: &str) -> String {
    let hint = hint.trim().to_ascii_lowercase();
    match hint.as_str() {
        "py" | "python" => "python".into(),
        "bash" | "sh" | "zsh" | "shell" => "bash".into(),
        "js" | "javascript" | "jsx" => "javascript".into(),
        // syntect's default set has no TypeScript grammar
        "ts" | "tsx" | "typescript" => "javascript".into(),
        "yaml" | "yml" => "yaml".into(),
        "rust" | "rs" => "rust".into(),
        "c" | "h" => "c".into(),
        "cpp" | "cc" | "cxx" | "hpp" | "c++" => "cpp".into(),
        other => other.into(),
    }
}

pub(crate) fn syntect_theme_name(theme: &Theme) -> &'static str {
    if theme.dark {
        "base16-ocean.dark"
    } else {
        "InspiredGitHub"
    }
}

fn cache_key(lang: &str, code: &str, theme: &Theme) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    lang.hash(&mut hasher);
    code.hash(&mut hasher);
    syntect_theme_name(theme).hash(&mut hasher);
    format!("{:?}", theme.codeblock_style.bg).hash(&mut hasher);
    hasher.finish()
}

/// Highlight a fenced code block. Returns `None` when the block cannot be
/// highlighted, in which case callers fall back to plain styling.
pub fn highlight_code_block(lang_hint: &str, code: &str, theme: &Theme) -> Option<Vec<Line<'static>>> {
    let lang = normalize_lang_hint(lang_hint);
    let key = cache_key(&lang, code, theme);
    if let Some(lines) = CACHE
        .lock()
        .ok()
        .and_then(|guard| guard.as_ref().and_then(|cache| cache.get(key)))
    {
        return Some(lines);
    }

    let ps = syntax_set();
    let syn_theme = theme_set().themes.get(syntect_theme_name(theme))?;
    let syntax = ps
        .find_syntax_by_token(&lang)
        .unwrap_or_else(|| ps.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, syn_theme);
    let bg = theme.codeblock_style.bg;

    let mut out = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter.highlight_line(line, ps).ok()?;
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .map(|(style, text)| {
                let text = text.strip_suffix('\n').unwrap_or(text);
                let fg = style.foreground;
                let mut st = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
                if let Some(bg) = bg {
                    st = st.bg(bg);
                }
                Span::styled(text.to_string(), st)
            })
            .filter(|span| !span.content.is_empty())
            .collect();
        out.push(Line::from(spans));
    }

    if let Ok(mut guard) = CACHE.lock() {
        guard.get_or_insert_with(HighlightCache::new).put(key, out.clone());
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lang_hint_maps_common_aliases() {
        assert_eq!(normalize_lang_hint("py"), "python");
        assert_eq!(normalize_lang_hint("JS"), "javascript");
        assert_eq!(normalize_lang_hint("TypeScript"), "javascript");
        assert_eq!(normalize_lang_hint("yml"), "yaml");
        assert_eq!(normalize_lang_hint("rs"), "rust");
    }

    #[test]
    fn theme_name_follows_mode() {
        assert_eq!(syntect_theme_name(&Theme::dark_default()), "base16-ocean.dark");
        assert_eq!(syntect_theme_name(&Theme::light()), "InspiredGitHub");
    }

    #[test]
    fn highlighting_keeps_line_count_and_text() {
        let code = "fn main() {\n    println!(\"hi\");\n}\n";
        let lines = highlight_code_block("rust", code, &Theme::dark_default()).expect("highlight");
        assert_eq!(lines.len(), 3);
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "    println!(\"hi\");");
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let lines = highlight_code_block("klingon", "qapla'", &Theme::light()).expect("plain");
        assert_eq!(lines.len(), 1);
    }
}
