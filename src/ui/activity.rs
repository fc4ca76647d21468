use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Activity ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.activity.len().saturating_sub(visible);
    let items: Vec<ListItem> = state
        .activity
        .iter()
        .skip(skip)
        .map(|line| {
            let style = match line.kind {
                ActivityKind::Info => Theme::text(),
                ActivityKind::Juice => Theme::juice(),
                ActivityKind::Warning => Theme::warning(),
                ActivityKind::Error => Theme::error(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", line.timestamp), Theme::timestamp()),
                Span::styled(line.text.clone(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
