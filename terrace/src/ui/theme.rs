//! Color theme and styling for the stack browser

use ratatui::style::{Color, Modifier, Style};

use terrace_core::FactContext;

/// Browser color theme
#[derive(Debug, Clone)]
pub struct StackTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Stack colors
    pub card: Color,
    pub stacked: Color,
    pub expanded: Color,
    pub badge: Color,
    pub member: Color,

    // Context colors
    pub global: Color,
    pub builder: Color,
    pub knowledge: Color,

    pub system_text: Color,
}

impl Default for StackTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            card: Color::White,
            stacked: Color::LightBlue,
            expanded: Color::LightGreen,
            badge: Color::Yellow,
            member: Color::Gray,

            global: Color::Magenta,
            builder: Color::LightYellow,
            knowledge: Color::Cyan,

            system_text: Color::DarkGray,
        }
    }
}

impl StackTheme {
    /// Get style for a lone fact card
    pub fn card_style(&self) -> Style {
        Style::default().fg(self.card)
    }

    /// Get style for a collapsed stack
    pub fn stacked_style(&self) -> Style {
        Style::default()
            .fg(self.stacked)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for the primary of an expanded stack
    pub fn expanded_style(&self) -> Style {
        Style::default()
            .fg(self.expanded)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a related member of an expanded stack
    pub fn member_style(&self) -> Style {
        Style::default().fg(self.member)
    }

    /// Get style for the related-count badge
    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.badge)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get the accent color for a context
    pub fn context_color(&self, context: FactContext) -> Color {
        match context {
            FactContext::Global => self.global,
            FactContext::Builder => self.builder,
            FactContext::Knowledge => self.knowledge,
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }
}
