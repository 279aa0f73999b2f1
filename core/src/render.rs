//! Text rendering of a `CatalogView`.
//!
//! The screen is a header bar, then either a spinner, an error line, or a
//! grid of product cards, then the pagination line and a footer bar. Cards
//! are laid out `columns` per row in server order. Widths are measured in
//! terminal columns, not bytes.

use owo_colors::Style;
use textwrap::core::display_width;

use crate::types::Product;
use crate::view::{CatalogView, Phase};

const GAP: &str = "  ";
const DESCRIPTION_LINES: usize = 3;
const PAGER_WINDOW: u32 = 7;

/// Layout and colors of the rendered screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header_text: String,
    pub footer_text: String,
    /// Background of the header and footer bars.
    pub accent: (u8, u8, u8),
    pub color: bool,
    pub columns: usize,
    pub card_width: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_text: "Header".to_string(),
            footer_text: "Footer".to_string(),
            accent: (0x40, 0x96, 0xff),
            color: true,
            columns: 6,
            card_width: 24,
        }
    }
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    fn columns(&self) -> usize {
        self.columns.max(1)
    }

    fn card_width(&self) -> usize {
        self.card_width.max(6)
    }

    fn screen_width(&self) -> usize {
        let columns = self.columns();
        columns * self.card_width() + (columns - 1) * GAP.len()
    }

    fn bar(&self, text: &str) -> String {
        let line = center(text, self.screen_width());
        if !self.color {
            return line;
        }
        let (r, g, b) = self.accent;
        Style::new().white().on_truecolor(r, g, b).style(line).to_string()
    }
}

/// One entry of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page numbers to show for `current` out of `count`, eliding long runs.
pub fn page_items(current: u32, count: u32) -> Vec<PageItem> {
    let count = count.max(1);
    let current = current.clamp(1, count);
    if count <= PAGER_WINDOW {
        return (1..=count).map(PageItem::Page).collect();
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(count - 1);
    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < count - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(count));
    items
}

/// Label shown next to the page selector.
pub fn total_label(total: u64) -> String {
    format!("Всего {total} продуктов")
}

pub fn render(view: &CatalogView, theme: &Theme) -> String {
    let width = theme.screen_width();
    let mut out = Vec::new();

    out.push(theme.bar(&theme.header_text));
    out.push(String::new());
    match view.phase() {
        Phase::Loading => out.push(center("⠋ Загрузка...", width)),
        Phase::Failed(message) => out.push(center(&format!("Ошибка: {message}"), width)),
        Phase::Loaded if view.products().is_empty() => out.push(center("Нет данных", width)),
        Phase::Loaded => {
            for row in view.products().chunks(theme.columns()) {
                out.extend(render_row(row, theme.card_width()));
            }
        }
    }
    out.push(String::new());
    out.push(center(&pagination_line(view), width));
    out.push(theme.bar(&theme.footer_text));

    let mut screen = out.join("\n");
    screen.push('\n');
    screen
}

fn pagination_line(view: &CatalogView) -> String {
    let current = view.current_page();
    // A page past the last loaded one is still listed, so it can be marked.
    let count = view.page_count().max(current);
    let pages: Vec<String> = page_items(current, count)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(p) if p == current => format!("[{p}]"),
            PageItem::Page(p) => p.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();
    format!(
        "{}  < {} >  {} / стр.",
        total_label(view.total()),
        pages.join(" "),
        view.page_size()
    )
}

fn render_row(row: &[Product], card_width: usize) -> Vec<String> {
    let cards: Vec<Vec<String>> = row.iter().map(|p| render_card(p, card_width)).collect();
    let height = cards.iter().map(Vec::len).max().unwrap_or(0);
    let blank = " ".repeat(card_width);

    let mut lines: Vec<String> = (0..height)
        .map(|i| {
            cards
                .iter()
                .map(|card| card.get(i).map_or(blank.as_str(), String::as_str))
                .collect::<Vec<_>>()
                .join(GAP)
                .trim_end()
                .to_string()
        })
        .collect();
    lines.push(String::new());
    lines
}

/// Box of exactly `width` columns; shorter cards are padded by the row.
fn render_card(product: &Product, width: usize) -> Vec<String> {
    let inner = width - 4;
    let mut body = vec![
        fit(&single_line(&product.title), inner),
        fit(&single_line(&product.thumbnail), inner),
    ];
    body.push("─".repeat(inner));

    let description = single_line(&product.description);
    let wrapped = textwrap::wrap(&description, inner);
    for (i, line) in wrapped.iter().enumerate() {
        if i + 1 == DESCRIPTION_LINES && wrapped.len() > DESCRIPTION_LINES {
            body.push(fit(&format!("{line}…"), inner));
            break;
        }
        body.push(line.to_string());
    }

    let mut card = vec![format!("┌{}┐", "─".repeat(width - 2))];
    card.extend(body.iter().map(|line| format!("│ {} │", pad(line, inner))));
    card.push(format!("└{}┘", "─".repeat(width - 2)));
    card
}

/// Server text with control characters (newlines, tabs, escapes) blanked.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Truncate to `width` columns, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = display_width(ch.encode_utf8(&mut [0; 4]));
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}

fn center(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    let left = fill / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
}
