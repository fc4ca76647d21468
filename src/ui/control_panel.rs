use crate::app::state::*;
use crate::squeezer::CitrusSize;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Controls ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines: Vec<Line> = Vec::new();
    for (i, size) in CitrusSize::ALL.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Theme::key_hint()),
            Span::raw(format!("{} ", size.glyph())),
            Span::styled(format!("{:<7}", size.label()), Theme::text()),
            Span::styled(size.description(), Theme::muted()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(" s ", Theme::key_hint()),
        Span::styled("squeeze  ", Theme::text()),
        Span::styled("d ", Theme::key_hint()),
        Span::styled("remove  ", Theme::text()),
        Span::styled("r ", Theme::key_hint()),
        Span::styled("reset", Theme::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" g ", Theme::key_hint()),
        Span::styled("stages  ", Theme::text()),
        Span::styled("/ ", Theme::key_hint()),
        Span::styled("command  ", Theme::text()),
        Span::styled("q ", Theme::key_hint()),
        Span::styled("quit", Theme::text()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Lemons:   ", Theme::muted()),
        Span::styled(state.store.objects().len().to_string(), Theme::text()),
        Span::styled("   Squeezes: ", Theme::muted()),
        Span::styled(state.store.squeeze_count().to_string(), Theme::text()),
    ]));

    if state.config.ui.fun_facts {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" 💡 {}", state.current_fun_fact()),
            Theme::muted(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
