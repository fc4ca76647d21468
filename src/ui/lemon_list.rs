use crate::app::state::*;
use crate::squeezer::format;
use crate::squeezer::CitrusObject;
use crate::ui::theme::{panel_border, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const BAR_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Lemons;
    let (border_style, border_type) = panel_border(focused);
    let lemons = state.store.objects();

    let title = if lemons.is_empty() {
        " Lemons ".to_string()
    } else {
        format!(" Lemons ({}) ", lemons.len())
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    if lemons.is_empty() {
        let items = vec![ListItem::new(Line::from(vec![
            Span::styled(" No lemons yet, press ", Theme::muted()),
            Span::styled("1", Theme::key_hint()),
            Span::styled(" / ", Theme::muted()),
            Span::styled("2", Theme::key_hint()),
            Span::styled(" / ", Theme::muted()),
            Span::styled("3", Theme::key_hint()),
            Span::styled(" to add one", Theme::muted()),
        ]))];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let pending = state.store.pending();
    let spinner = SPINNER[(state.tick_count as usize) % SPINNER.len()];
    let items: Vec<ListItem> = lemons
        .iter()
        .enumerate()
        .map(|(i, lemon)| {
            let squeezing = pending == Some(lemon.id);
            ListItem::new(lemon_line(i + 1, lemon, squeezing, spinner))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn lemon_line(position: usize, lemon: &CitrusObject, squeezing: bool, spinner: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("{:>2}. ", position), Theme::muted()),
        Span::raw(format!("{} ", lemon.size.glyph())),
        Span::styled(format!("{:<6}", lemon.size.label()), Theme::text()),
        Span::styled(format!(" [{}] ", lemon.id), Theme::muted()),
        Span::styled(
            format!("max {:<7}", format::format_juice(lemon.capacity)),
            Theme::muted(),
        ),
    ];

    if lemon.squeezed {
        let pct = format::extraction_percent(lemon.extracted, lemon.capacity);
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        spans.push(Span::styled("✅ ", Theme::squeezed()));
        spans.push(Span::styled(
            format::format_juice(lemon.extracted),
            Theme::juice(),
        ));
        spans.push(Span::styled(
            format!(
                " {}{} {:.0}%",
                "█".repeat(filled.min(BAR_WIDTH)),
                "░".repeat(BAR_WIDTH.saturating_sub(filled)),
                pct
            ),
            Theme::juice(),
        ));
    } else if squeezing {
        spans.push(Span::styled(
            format!("{} Squeezing...", spinner),
            Theme::squeezing(),
        ));
    } else {
        spans.push(Span::styled("Squeeze! 🤏", Theme::text()));
    }

    Line::from(spans)
}
