use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::ui::wrap::line_width;

const MIN_COLUMN_WIDTH: usize = 3;

type TableCell = Vec<Span<'static>>;

/// Collects table cells while the markdown parser walks a table, then lays
/// them out with box-drawing borders.
#[derive(Debug, Default)]
pub(crate) struct TableRenderer {
    rows: Vec<Vec<TableCell>>,
    current_row: Vec<TableCell>,
    current_cell: TableCell,
    header_rows: usize,
}

impl TableRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn end_header(&mut self) {
        // The header has no TableRow wrapper; its cells end with the head.
        if !self.current_row.is_empty() {
            self.rows.push(std::mem::take(&mut self.current_row));
        }
        self.header_rows = self.rows.len();
    }

    pub(crate) fn end_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.current_row));
    }

    pub(crate) fn end_cell(&mut self) {
        self.current_row.push(std::mem::take(&mut self.current_cell));
    }

    pub(crate) fn add_span(&mut self, span: Span<'static>) {
        self.current_cell.push(span);
    }

    pub(crate) fn render(self, max_width: usize, border_style: Style) -> Vec<Line<'static>> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Vec::new();
        }

        let mut widths = vec![MIN_COLUMN_WIDTH; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(line_width(cell));
            }
        }
        balance_column_widths(&mut widths, max_width);

        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        lines.push(border_line("┌", "┬", "┐", &widths, border_style));
        for (index, row) in self.rows.iter().enumerate() {
            lines.push(content_line(row, &widths, border_style));
            if index + 1 == self.header_rows && index + 1 < self.rows.len() {
                lines.push(border_line("├", "┼", "┤", &widths, border_style));
            }
        }
        lines.push(border_line("└", "┴", "┘", &widths, border_style));
        lines
    }
}

/// Shrink the widest columns until the table (borders and padding
/// included) fits in `max_width`.
pub(crate) fn balance_column_widths(widths: &mut [usize], max_width: usize) {
    let overhead = widths.len() * 3 + 1;
    let budget = max_width.saturating_sub(overhead);
    loop {
        let total: usize = widths.iter().sum();
        if total <= budget {
            return;
        }
        let Some((index, widest)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, width)| *width)
        else {
            return;
        };
        if widest <= MIN_COLUMN_WIDTH {
            return;
        }
        widths[index] = widest - 1;
    }
}

fn border_line(left: &str, mid: &str, right: &str, widths: &[usize], style: Style) -> Line<'static> {
    let mut text = String::from(left);
    for (i, width) in widths.iter().enumerate() {
        text.push_str(&"─".repeat(width + 2));
        if i + 1 < widths.len() {
            text.push_str(mid);
        }
    }
    text.push_str(right);
    Line::from(Span::styled(text, style))
}

fn content_line(row: &[TableCell], widths: &[usize], border_style: Style) -> Line<'static> {
    let mut spans = vec![Span::styled("│", border_style)];
    for (i, width) in widths.iter().enumerate() {
        spans.push(Span::raw(" "));
        let cell = row.get(i).cloned().unwrap_or_default();
        let mut used = 0usize;
        for span in cell {
            let span_width = UnicodeWidthStr::width(span.content.as_ref());
            if used + span_width <= *width {
                used += span_width;
                spans.push(span);
            } else {
                let clipped = clip_to_width(span.content.as_ref(), width - used);
                used += UnicodeWidthStr::width(clipped.as_str());
                spans.push(Span::styled(clipped, span.style));
                break;
            }
        }
        if used < *width {
            spans.push(Span::raw(" ".repeat(width - used)));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled("│", border_style));
    }
    Line::from(spans)
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthStr::width(ch.encode_utf8(&mut [0; 4]));
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
