use crate::app::state::*;
use crate::squeezer::format;
use crate::squeezer::JuiceQuality;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const GLASS_WIDTH: usize = 12;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Juice ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let collection = state.store.collection();
    let stats_height = 5u16;
    let glass_rows = inner.height.saturating_sub(stats_height + 1).max(1) as usize;
    let fill = format::glass_fill(collection.total_amount, state.config.ui.glass_capacity_ml);
    let filled_rows = (fill * glass_rows as f64).round() as usize;

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..glass_rows {
        let from_bottom = glass_rows - row;
        let content = if from_bottom <= filled_rows {
            Span::styled("▓".repeat(GLASS_WIDTH), Theme::juice())
        } else {
            Span::raw(" ".repeat(GLASS_WIDTH))
        };
        lines.push(Line::from(vec![
            Span::styled("  │", Theme::muted()),
            content,
            Span::styled("│", Theme::muted()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("  └{}┘", "─".repeat(GLASS_WIDTH)),
        Theme::muted(),
    )));

    lines.push(Line::from(vec![
        Span::styled(" Total:       ", Theme::muted()),
        Span::styled(format::format_juice(collection.total_amount), Theme::juice()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Lemons used: ", Theme::muted()),
        Span::styled(collection.lemons_used.to_string(), Theme::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Efficiency:  ", Theme::muted()),
        Span::styled(format!("{:.0}%", state.store.efficiency() * 100.0), Theme::text()),
    ]));
    if collection.total_amount > 0.0 {
        let style = match collection.quality {
            JuiceQuality::Excellent => Theme::quality_excellent(),
            JuiceQuality::Good => Theme::quality_good(),
            JuiceQuality::Poor => Theme::quality_poor(),
        };
        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", format::quality_badge(collection.quality))),
            Span::styled(format!("{} Quality", collection.quality), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
