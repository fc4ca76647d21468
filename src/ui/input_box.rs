use crate::app::state::*;
use crate::ui::theme::{panel_border, Theme};
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Input;
    let (border_style, border_type) = panel_border(focused);

    let block = Block::default()
        .title(" Command ")
        .title_style(if focused {
            Theme::title()
        } else {
            Theme::border()
        })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_text = &state.input.text;

    if focused {
        let line = Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(input_text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        // Cursor offset: chevron "❯ " (2 cells) + display width before the cursor
        let before = &input_text[..state.input.cursor.min(input_text.len())];
        let cursor_x = inner.x + 2 + before.width() as u16;
        if inner.width > 0 {
            frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
        }
    } else if input_text.is_empty() {
        let hint = Paragraph::new("Press / to type a command, ? for help").style(Theme::muted());
        frame.render_widget(hint, inner);
    } else {
        frame.render_widget(Paragraph::new(input_text.as_str()).style(Theme::input_text()), inner);
    }
}
