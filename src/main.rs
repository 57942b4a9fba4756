use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use shizi::app::App;
use shizi::bank::WordBank;
use shizi::bank::sampler::OPTION_COUNT;
use shizi::config::Config;
use shizi::event::{AppEvent, EventHandler};
use shizi::logging;
use shizi::quiz::Phase;
use shizi::ui::components::progress_bar::ProgressBar;
use shizi::ui::components::question::QuestionCard;
use shizi::ui::components::summary::Summary;
use shizi::ui::components::wrong_list::WrongList;
use shizi::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use shizi::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "shizi", version, about = "Pinyin flashcard quiz for Chinese characters")]
struct Cli {
    #[arg(short, long, help = "Word bank CSV (character,pinyin,examples)")]
    bank: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Seed for option shuffling")]
    seed: Option<u64>,

    #[arg(long, help = "Start with pinyin hidden in the wrong-character list")]
    hide_pinyin: bool,

    #[arg(long, help = "Validate the word bank and exit")]
    check: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(bank) = cli.bank {
        config.word_bank = Some(bank);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.hide_pinyin {
        config.show_pinyin = false;
    }

    let _log_guard = match logging::init(Path::new(&config.log_dir), &config.log_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: file logging disabled: {err:#}");
            None
        }
    };

    // Fatal load errors are reported before the terminal is taken over.
    let bank = load_bank(&config)?;

    if cli.check {
        return Ok(check_bank(&bank));
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let mut app = App::new(&config, Arc::new(bank), theme, cli.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(%err, "quiz loop failed");
        eprintln!("Error: {err:?}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn load_bank(config: &Config) -> Result<WordBank> {
    match config.word_bank_path() {
        Some(path) => WordBank::load(&path)
            .with_context(|| format!("loading word bank {}", path.display())),
        None => WordBank::bundled().context("loading bundled word bank"),
    }
}

fn check_bank(bank: &WordBank) -> ExitCode {
    let distinct = bank.pinyin_universe().len();
    println!("{} cards, {distinct} distinct pinyin", bank.len());
    if distinct < OPTION_COUNT {
        println!("need at least {OPTION_COUNT} distinct pinyin values to build options");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Redraw => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let phase = app.phase();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc if phase == Phase::Choosing => app.hide(),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('p') => app.toggle_pinyin(),
        KeyCode::Enter | KeyCode::Char(' ') => app.primary_action(),
        KeyCode::Up | KeyCode::Char('k') if phase == Phase::Choosing => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') if phase == Phase::Choosing => app.select_next(),
        KeyCode::Char(ch @ '1'..='9') => {
            let idx = ch as usize - '1' as usize;
            if idx < OPTION_COUNT {
                app.submit_option(idx);
            }
        }
        KeyCode::Char('n') => app.advance(),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}

fn footer_hints(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::Hidden => &["[Space] 请选择拼音", "[p] 拼音", "[q] 退出"],
        Phase::Choosing => &[
            "[↑↓/1-4] 选择",
            "[Enter] 提交",
            "[Esc] 收起",
            "[p] 拼音",
            "[q] 退出",
        ],
        Phase::Answered => &["[Enter/n] 下一题", "[p] 拼音", "[q] 退出"],
        Phase::Complete => &["[r] 重新开始", "[p] 拼音", "[q] 退出"],
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let view = app.view();

    let hints = pack_hint_lines(footer_hints(view.phase), area.width as usize);
    let layout = AppLayout::new(area, hints.len() as u16);

    let wrong_text = if layout.sidebar.is_none() && !view.wrong.is_empty() {
        format!("  错字：{}", view.wrong.len())
    } else {
        String::new()
    };
    let header_info = format!(
        " 字库：{}  完成：{}  答对：{}{wrong_text}",
        view.total, view.index, view.correct_count
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " 安安识字 ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    if view.is_complete() {
        let centered = centered_rect(80, 80, layout.main);
        frame.render_widget(Summary::new(&view, app.theme), centered);
    } else {
        let card = QuestionCard::new(
            &view,
            app.selected_option,
            app.feedback.as_ref(),
            app.status.as_deref(),
            app.theme,
        );
        frame.render_widget(card, layout.main);
    }

    if let Some(progress_area) = layout.progress {
        let progress = ProgressBar::new("完成", view.index, view.total, app.theme);
        frame.render_widget(progress, progress_area);
    }

    if let Some(sidebar_area) = layout.sidebar {
        frame.render_widget(WrongList::new(&view.wrong, app.theme), sidebar_area);
    }

    let footer_lines: Vec<Line> = hints
        .into_iter()
        .map(|h| Line::from(Span::styled(h, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}
