use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_ELEVATED: Color = Color::Rgb(36, 36, 30);
    pub const BORDER_DIM: Color = Color::Rgb(70, 70, 60);
    pub const TEXT_PRIMARY: Color = Color::Rgb(235, 235, 225);
    pub const TEXT_MUTED: Color = Color::Rgb(120, 120, 110);
    pub const ACCENT_LEMON: Color = Color::Rgb(245, 215, 70);
    pub const ACCENT_LIME: Color = Color::Rgb(150, 210, 90);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const JUICE: Color = Color::Rgb(250, 200, 40);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_LEMON)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Self::BG_ELEVATED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn juice() -> Style {
        Style::default().fg(Self::JUICE)
    }

    pub fn squeezing() -> Style {
        Style::default()
            .fg(Self::ACCENT_LEMON)
            .add_modifier(Modifier::BOLD)
    }

    pub fn squeezed() -> Style {
        Style::default().fg(Self::ACCENT_LIME)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn quality_excellent() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIME)
            .add_modifier(Modifier::BOLD)
    }

    pub fn quality_good() -> Style {
        Style::default().fg(Self::ACCENT_LEMON)
    }

    pub fn quality_poor() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Color::DarkGray)
    }

    pub fn stage_bar() -> Style {
        Style::default().fg(Self::ACCENT_TEAL).bg(Self::BG_ELEVATED)
    }
}

/// Block styling for a panel, depending on focus.
pub fn panel_border(focused: bool) -> (Style, BorderType) {
    if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    }
}
