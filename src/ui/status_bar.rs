use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    if state.store.is_squeezing() {
        parts.push(Span::styled(
            " [SQUEEZING] ",
            Style::default().fg(Color::Black).bg(Theme::ACCENT_LEMON),
        ));
    } else {
        parts.push(Span::styled(
            " [READY] ",
            Style::default().fg(Color::Green).bg(Color::DarkGray),
        ));
    }

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let focus_name = match state.focus {
        FocusPanel::Lemons => "LEMONS",
        FocusPanel::Input => "COMMAND",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Color::Cyan).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
