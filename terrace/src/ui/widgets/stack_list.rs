//! Stack list widget: one row per card, layered rows for stacks

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use terrace_core::{Fact, StackDisplay};

use crate::ui::theme::StackTheme;

/// Widget listing the stacks of one context
pub struct StackListWidget<'a> {
    entries: &'a [StackDisplay<'a>],
    title: String,
    selected: usize,
    theme: &'a StackTheme,
    focused: bool,
}

impl<'a> StackListWidget<'a> {
    pub fn new(entries: &'a [StackDisplay<'a>], theme: &'a StackTheme) -> Self {
        Self {
            entries,
            title: String::new(),
            selected: 0,
            theme,
            focused: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn entry_lines(&self, entry: &StackDisplay<'a>, is_selected: bool) -> Vec<Line<'a>> {
        let marker = if is_selected { "> " } else { "  " };
        let highlight = |style: Style| {
            if is_selected {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            }
        };

        match *entry {
            StackDisplay::Card(fact) => vec![Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("[ ] {}", label(fact)), highlight(self.theme.card_style())),
            ])],
            StackDisplay::Stacked { primary, badge } => vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("[=] {}", label(primary)),
                        highlight(self.theme.stacked_style()),
                    ),
                    Span::raw(" "),
                    Span::styled(format!(" +{badge} "), self.theme.badge_style()),
                ]),
            ],
            StackDisplay::Expanded(members) => {
                let mut lines = Vec::with_capacity(members.len());
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("[-] {}", label(&members[0])),
                        highlight(self.theme.expanded_style()),
                    ),
                ]));
                let last = members.len() - 1;
                for (i, member) in members.iter().enumerate().skip(1) {
                    let branch = if i == last { "└─" } else { "├─" };
                    lines.push(Line::from(vec![
                        Span::raw("    "),
                        Span::styled(branch, self.theme.system_style()),
                        Span::styled(format!(" {}", label(member)), self.theme.member_style()),
                    ]));
                }
                lines
            }
        }
    }
}

impl Widget for StackListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No facts in this context",
                self.theme.system_style(),
            )))
            .render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        let mut selected_start = 0;
        let mut selected_rows = 1;
        for (i, entry) in self.entries.iter().enumerate() {
            if i == self.selected {
                selected_start = lines.len();
                selected_rows = entry.rows();
            }
            lines.extend(self.entry_lines(entry, i == self.selected));
        }

        // Keep the whole selected entry on screen when it fits
        let height = inner.height as usize;
        let selected_end = selected_start + selected_rows.min(height.max(1));
        let scroll = selected_end.saturating_sub(height).min(selected_start);

        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(inner, buf);
    }
}

/// One-line label for a fact: statement, falling back to the id
fn label(fact: &Fact) -> String {
    match fact.statement.as_deref() {
        Some(statement) if !statement.is_empty() => statement.to_string(),
        _ => fact.id.to_string(),
    }
}
