use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥70 cols: question area + wrong-character sidebar
    Narrow, // <70 cols: question area only, wrong count in header
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 70 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }

    pub fn show_progress_bar(&self, height: u16) -> bool {
        height >= 18
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub progress: Option<Rect>,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area);
        let show_progress = tier.show_progress_bar(area.height);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(if show_progress { 3 } else { 0 }),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        let progress = show_progress.then_some(vertical[2]);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(40), Constraint::Length(24)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                progress,
                sidebar: Some(horizontal[1]),
                footer: vertical[3],
                tier,
            }
        } else {
            Self {
                header: vertical[0],
                main: vertical[1],
                progress,
                sidebar: None,
                footer: vertical[3],
                tier,
            }
        }
    }
}

/// Greedily pack key hints into as few lines as fit in `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.is_empty() {
            format!("{prefix}{hint}")
        } else {
            format!("{current}{separator}{hint}")
        };
        if current.is_empty() || candidate.chars().count() <= width {
            current = candidate;
        } else {
            out.push(std::mem::take(&mut current));
            current = format!("{prefix}{hint}");
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 10;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
