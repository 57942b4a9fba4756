use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::view::QuizView;
use crate::ui::theme::Theme;

/// Final score shown once every question has been passed.
pub struct Summary<'a> {
    view: &'a QuizView<'a>,
    theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(view: &'a QuizView<'a>, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    correct as f64 / total as f64 * 100.0
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" 完成 ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let summary = self.view.summary().unwrap_or_default();
        Paragraph::new(Line::from(Span::styled(
            summary,
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let acc = accuracy(self.view.correct_count, self.view.total);
        let acc_color = if acc >= 90.0 {
            colors.success()
        } else if acc >= 60.0 {
            colors.warning()
        } else {
            colors.error()
        };
        Paragraph::new(Line::from(vec![
            Span::styled("  正确率： ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{acc:.0}%"),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[2], buf);

        let wrong = self.view.wrong.len();
        Paragraph::new(Line::from(vec![
            Span::styled("  错字：   ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{wrong}"),
                Style::default().fg(if wrong == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]))
        .render(layout[3], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [r] 重新开始  ", Style::default().fg(colors.accent())),
            Span::styled("[q] 退出", Style::default().fg(colors.accent())),
        ]))
        .render(layout[5], buf);
    }
}
