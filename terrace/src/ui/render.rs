//! Render orchestration for the stack browser

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use terrace_core::FactContext;

use crate::app::App;
use crate::ui::widgets::StackListWidget;

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Context tabs
            Constraint::Min(3),    // Stacks
            Constraint::Length(1), // Status
            Constraint::Length(1), // Hotkeys
        ])
        .split(area);

    render_title_bar(frame, app, chunks[0]);
    render_context_tabs(frame, app, chunks[1]);

    let entries = app.layout();
    let list = StackListWidget::new(&entries, &app.theme)
        .title(format!(
            "{} · {} stacks · {} facts",
            app.context.title(),
            app.stacks().len(),
            app.region_len()
        ))
        .selected(app.selected)
        .focused(!app.has_overlay());
    frame.render_widget(list, chunks[2]);

    render_status_bar(frame, app, chunks[3]);
    render_hotkey_bar(frame, app, chunks[4]);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let corpus = if app.corpus_name.is_empty() {
        "untitled corpus"
    } else {
        app.corpus_name.as_str()
    };
    let title = Line::from(vec![
        Span::styled(" Terrace ", app.theme.title_style()),
        Span::raw("· "),
        Span::raw(corpus.to_string()),
        Span::styled(
            format!("  [{}]", app.relation_source()),
            app.theme.system_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// Render one tab per context, with fact counts
fn render_context_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = FactContext::ALL
        .iter()
        .map(|context| {
            Line::from(Span::styled(
                format!("{} ({})", context.title(), app.count_in(*context)),
                Style::default().fg(app.theme.context_color(*context)),
            ))
        })
        .collect();

    let selected = FactContext::ALL
        .iter()
        .position(|c| *c == app.context)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider("|");
    frame.render_widget(tabs, area);
}

/// Render the status line
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.status_message() {
        Some(message) => message.to_string(),
        None => match app.source.as_ref() {
            Some(path) => format!("{}", path.display()),
            None => "built-in sample corpus".to_string(),
        },
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {text}"),
            app.theme.system_style(),
        ))),
        area,
    );
}

/// Render the hotkey hints
fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = [
        ("Tab", "context"),
        ("j/k", "select"),
        ("Enter", "expand"),
        ("c", "collapse all"),
        ("s", "source"),
        ("r", "reload"),
        ("?", "help"),
        ("q", "quit"),
    ];

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            app.theme.badge_style(),
        ));
        spans.push(Span::raw(format!(" {action} ")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render an overlay on top of everything
fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => {
            let popup = centered_rect_fixed(56, 16, area);
            frame.render_widget(Clear, popup);

            let lines = vec![
                Line::from(Span::styled("Keys", app.theme.title_style())),
                Line::from(""),
                Line::from("  Tab / Shift-Tab   next / previous context"),
                Line::from("  j / k, arrows     move selection"),
                Line::from("  g / G             first / last stack"),
                Line::from("  Enter / Space     expand or collapse stack"),
                Line::from("  c                 collapse every stack"),
                Line::from("  s                 cycle relation source"),
                Line::from("  r                 reload snapshot from disk"),
                Line::from("  ? / Esc           close this help"),
                Line::from("  q / Ctrl-C        quit"),
                Line::from(""),
                Line::from(Span::styled(
                    "[ ] lone fact   [=] stack   [-] expanded",
                    app.theme.system_style(),
                )),
            ];

            let help = Paragraph::new(lines)
                .block(
                    Block::default()
                        .title(" Help ")
                        .borders(Borders::ALL)
                        .border_style(app.theme.border_style(true)),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(help, popup);
        }
    }
}

/// A rectangle of fixed size centered in `area`, clamped to fit
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
