use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::table::TableRenderer;
use crate::ui::syntax::highlight_code_block;
use crate::ui::theme::Theme;
use crate::ui::wrap::wrap_spans;

/// Per-message rendering switches, usually taken from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub markdown: bool,
    pub syntax: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            markdown: true,
            syntax: true,
        }
    }
}

/// Render message content into wrapped lines no wider than `width`.
pub fn render_content(
    content: &str,
    base: Style,
    theme: &Theme,
    width: usize,
    options: RenderOptions,
) -> Vec<Line<'static>> {
    if options.markdown {
        render_markdown(content, base, theme, width, options.syntax)
    } else {
        render_plain(content, base, width)
    }
}

pub fn render_markdown(
    content: &str,
    base: Style,
    theme: &Theme,
    width: usize,
    syntax: bool,
) -> Vec<Line<'static>> {
    MarkdownRenderer::new(theme, base, width, syntax).run(content)
}

pub fn render_plain(content: &str, base: Style, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for raw in content.lines() {
        for wrapped in wrap_spans(&[Span::styled(raw.to_string(), base)], width) {
            lines.push(Line::from(wrapped));
        }
    }
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

struct CodeBlock {
    lang: String,
    text: String,
}

struct ListLevel {
    next_number: Option<u64>,
    pending_marker: Option<String>,
    indent: usize,
}

struct MarkdownRenderer<'t> {
    theme: &'t Theme,
    base: Style,
    width: usize,
    syntax: bool,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<ListLevel>,
    quote_depth: usize,
    code: Option<CodeBlock>,
    table: Option<TableRenderer>,
    link: Option<(String, usize)>,
    needs_gap: bool,
}

impl<'t> MarkdownRenderer<'t> {
    fn new(theme: &'t Theme, base: Style, width: usize, syntax: bool) -> Self {
        Self {
            theme,
            base,
            width: width.max(1),
            syntax,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            code: None,
            table: None,
            link: None,
            needs_gap: false,
        }
    }

    fn run(mut self, content: &str) -> Vec<Line<'static>> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        for event in Parser::new_ext(content, options) {
            self.event(event);
        }
        self.flush();
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, style: Style) {
        let next = self.style().patch(style);
        self.styles.push(next);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.table.as_mut() {
            Some(table) => table.add_span(span),
            None => self.spans.push(span),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.text.push_str(&text);
                } else {
                    let style = self.style();
                    self.push_span(Span::styled(text.into_string(), style));
                }
            }
            Event::Code(code) => {
                let style = self.style().patch(self.theme.inline_code_style);
                self.push_span(Span::styled(code.into_string(), style));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.style();
                self.push_span(Span::styled(html.trim_end().to_string(), style));
            }
            Event::SoftBreak => {
                let style = self.style();
                self.push_span(Span::styled(" ", style));
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.open_block();
                let rule = "─".repeat(self.width.saturating_sub(self.prefix_width()).max(1));
                let mut line = self.prefix();
                line.push(Span::styled(rule, self.theme.border_style));
                self.lines.push(Line::from(line));
                self.needs_gap = true;
            }
            Event::TaskListMarker(done) => {
                let style = self.style();
                let marker = if done { "[x] " } else { "[ ] " };
                self.push_span(Span::styled(marker, style));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                let mut style = self.theme.heading_style;
                if level == HeadingLevel::H1 {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(self.theme.quote_style);
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or("").to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(CodeBlock {
                    lang,
                    text: String::new(),
                });
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(ListLevel {
                    next_number: start,
                    pending_marker: None,
                    indent: 0,
                });
            }
            Tag::Item => {
                self.flush();
                let nested = self.lists.len() > 1;
                if let Some(level) = self.lists.last_mut() {
                    let marker = match level.next_number.as_mut() {
                        Some(number) => {
                            let marker = format!("{number}. ");
                            *number += 1;
                            marker
                        }
                        None if nested => "◦ ".to_string(),
                        None => "• ".to_string(),
                    };
                    level.indent = UnicodeWidthStr::width(marker.as_str());
                    level.pending_marker = Some(marker);
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.link = Some((dest_url.into_string(), self.spans.len()));
                self.push_style(self.theme.link_style);
            }
            Tag::Table(_) => {
                self.flush();
                self.table = Some(TableRenderer::new());
            }
            Tag::TableHead => self.push_style(self.theme.table_header_style),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.needs_gap = true;
                }
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.styles.pop();
                self.needs_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.styles.pop();
                self.needs_gap = true;
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.emit_code(code);
                }
                if self.lists.is_empty() {
                    self.needs_gap = true;
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.needs_gap = true;
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link | TagEnd::Image => self.end_link(),
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.open_block();
                    let available = self.width.saturating_sub(self.prefix_width());
                    for line in table.render(available, self.theme.table_border_style) {
                        let mut out = self.prefix();
                        out.extend(line.spans);
                        self.lines.push(Line::from(out));
                    }
                }
                self.needs_gap = true;
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.end_header();
                }
                self.styles.pop();
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.end_cell();
                }
            }
            _ => {}
        }
    }

    fn end_link(&mut self) {
        self.styles.pop();
        let Some((url, start)) = self.link.take() else {
            return;
        };
        if self.table.is_some() || url.is_empty() {
            return;
        }
        let text: String = self
            .spans
            .get(start..)
            .unwrap_or(&[])
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        if text.trim() != url {
            self.spans
                .push(Span::styled(format!(" ({url})"), self.theme.link_url_style));
        }
    }

    fn emit_code(&mut self, code: CodeBlock) {
        self.open_block();
        let text = code.text.trim_end_matches('\n');
        let highlighted = if self.syntax {
            highlight_code_block(&code.lang, text, self.theme)
        } else {
            None
        };
        let lines = highlighted.unwrap_or_else(|| {
            text.lines()
                .map(|line| Line::from(Span::styled(line.to_string(), self.theme.codeblock_style)))
                .collect()
        });
        for line in lines {
            let mut out = self.prefix();
            out.push(Span::styled("  ", self.theme.codeblock_style));
            out.extend(line.spans);
            self.lines.push(Line::from(out));
        }
    }

    fn open_block(&mut self) {
        if self.needs_gap && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.needs_gap = false;
    }

    fn prefix_width(&self) -> usize {
        self.quote_depth * 2 + self.lists.iter().map(|level| level.indent).sum::<usize>()
    }

    // Quote bars, then list indentation; the innermost list contributes its
    // marker the first time a line is emitted for the item.
    fn prefix(&mut self) -> Vec<Span<'static>> {
        let mut out = Vec::new();
        for _ in 0..self.quote_depth {
            out.push(Span::styled("│ ", self.theme.quote_style));
        }
        let depth = self.lists.len();
        for (index, level) in self.lists.iter_mut().enumerate() {
            if index + 1 == depth {
                if let Some(marker) = level.pending_marker.take() {
                    out.push(Span::styled(marker, self.base));
                    continue;
                }
            }
            if level.indent > 0 {
                out.push(Span::raw(" ".repeat(level.indent)));
            }
        }
        out
    }

    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        self.open_block();
        let available = self.width.saturating_sub(self.prefix_width()).max(1);
        for wrapped in wrap_spans(&spans, available) {
            let mut out = self.prefix();
            out.extend(wrapped);
            self.lines.push(Line::from(out));
        }
    }
}
