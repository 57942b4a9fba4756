use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::quiz::view::QuizView;
use crate::quiz::{Outcome, Phase};
use crate::ui::theme::Theme;

/// The current character, its options once revealed, and answer feedback.
pub struct QuestionCard<'a> {
    view: &'a QuizView<'a>,
    selected: usize,
    feedback: Option<&'a Outcome>,
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(
        view: &'a QuizView<'a>,
        selected: usize,
        feedback: Option<&'a Outcome>,
        status: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            view,
            selected,
            feedback,
            status,
            theme,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = vec![Line::from("")];

        let Some(card) = self.view.card else {
            return lines;
        };

        lines.push(Line::from(vec![
            Span::styled("请选择拼音： ", Style::default().fg(colors.fg())),
            Span::styled(
                card.character.as_str(),
                Style::default()
                    .fg(colors.character())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));

        match self.view.options {
            None => {
                lines.push(Line::from(Span::styled(
                    "[Space] 👉 请选择拼音",
                    Style::default().fg(colors.accent()),
                )));
            }
            Some(options) => {
                let answered = self.view.phase == Phase::Answered;
                for (i, pinyin) in options.iter().enumerate() {
                    let is_selected = i == self.selected;
                    let is_answer = answered && pinyin == card.pinyin;
                    let indicator = if is_selected { ">" } else { " " };
                    let mut style = Style::default().fg(if is_answer {
                        colors.success()
                    } else if is_selected {
                        colors.accent()
                    } else {
                        colors.fg()
                    });
                    if is_selected {
                        style = style.bg(colors.selected_bg()).add_modifier(Modifier::BOLD);
                    }
                    lines.push(Line::from(Span::styled(
                        format!(" {indicator} {}. {pinyin}", i + 1),
                        style,
                    )));
                }
            }
        }
        lines.push(Line::from(""));

        if let Some(feedback) = self.feedback {
            if let Some(message) = feedback.message() {
                let color = match feedback {
                    Outcome::Correct { .. } => colors.success(),
                    _ => colors.warning(),
                };
                lines.push(Line::from(Span::styled(
                    message,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
            }
        }

        if let Some(examples) = self.view.examples_text() {
            lines.push(Line::from(vec![
                Span::styled("示例词：", Style::default().fg(colors.muted())),
                Span::styled(examples, Style::default().fg(colors.fg())),
            ]));
        }

        if let Some(status) = self.status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(colors.error()),
            )));
        }

        lines
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" 第 {} 题 ", self.view.index + 1))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
