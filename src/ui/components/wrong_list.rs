use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::view::WrongEntry;
use crate::ui::theme::Theme;

/// Sidebar listing every character missed at least once.
pub struct WrongList<'a> {
    entries: &'a [WrongEntry<'a>],
    theme: &'a Theme,
}

impl<'a> WrongList<'a> {
    pub fn new(entries: &'a [WrongEntry<'a>], theme: &'a Theme) -> Self {
        Self { entries, theme }
    }
}

fn entry_text(entry: &WrongEntry<'_>) -> String {
    match entry.pinyin {
        Some(pinyin) => format!("{} ({pinyin})", entry.character),
        None => entry.character.to_string(),
    }
}

impl Widget for WrongList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" ❌ 错字表 ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = if self.entries.is_empty() {
            vec![Line::from(Span::styled(
                "暂无错字",
                Style::default().fg(colors.muted()),
            ))]
        } else {
            // newest misses stay visible when the list overflows
            let skip = self
                .entries
                .len()
                .saturating_sub(inner.height as usize);
            self.entries
                .iter()
                .skip(skip)
                .map(|e| {
                    Line::from(Span::styled(
                        entry_text(e),
                        Style::default().fg(colors.error()),
                    ))
                })
                .collect()
        };

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_text_with_and_without_pinyin() {
        let with = WrongEntry { character: "爱", pinyin: Some("ài") };
        let without = WrongEntry { character: "爱", pinyin: None };
        assert_eq!(entry_text(&with), "爱 (ài)");
        assert_eq!(entry_text(&without), "爱");
    }

    // Wide glyphs fill two cells and the trailing cell is blanked, so spaces
    // are dropped to read CJK text back as one run.
    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .filter(|s| *s != " ")
            .collect()
    }

    #[test]
    fn test_empty_list_placeholder() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        WrongList::new(&[], &theme).render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("暂无错字"));
    }

    #[test]
    fn test_entries_replace_placeholder() {
        let theme = Theme::default();
        let entries = [
            WrongEntry { character: "爱", pinyin: Some("ài") },
            WrongEntry { character: "口", pinyin: None },
        ];
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        WrongList::new(&entries, &theme).render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("爱(ài)"));
        assert!(row_text(&buf, 2).contains("口"));
        assert!(!row_text(&buf, 1).contains("暂无错字"));
    }
}
