use crate::app::state::*;
use crate::squeezer::stages::Stage;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const PROGRESS_WIDTH: usize = 12;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = Style::default().bg(Theme::BG_ELEVATED);

    let line = match &state.stage {
        Some(pipeline) => {
            let stage = pipeline.stage();
            let filled = (pipeline.progress() * PROGRESS_WIDTH as f64).round() as usize;
            let status = match stage {
                Stage::Done => "done".to_string(),
                _ if pipeline.is_awaiting_squeeze() => "squeezing".to_string(),
                _ => format!("{} left", pipeline.remaining_in_stage()),
            };
            Line::from(vec![
                Span::styled(" ◆ ", Theme::stage_bar().add_modifier(Modifier::BOLD)),
                Span::styled(format!("{} ", stage.verb()), Theme::stage_bar()),
                Span::styled(
                    format!(
                        "[{}{}] ",
                        "■".repeat(filled.min(PROGRESS_WIDTH)),
                        "□".repeat(PROGRESS_WIDTH.saturating_sub(filled))
                    ),
                    Theme::stage_bar(),
                ),
                Span::styled(format!("{} │ ", status), Theme::stage_bar()),
                Span::styled(stage.hint(), Theme::muted().bg(Theme::BG_ELEVATED)),
            ])
        }
        None if state.config.ui.show_motivation => Line::from(vec![
            Span::styled(" 🍋 Lemon Squeezer │ ", Theme::stage_bar().add_modifier(Modifier::BOLD)),
            Span::styled(state.motivation, Theme::muted().bg(Theme::BG_ELEVATED)),
        ]),
        None => Line::from(Span::styled(
            " 🍋 Lemon Squeezer",
            Theme::stage_bar().add_modifier(Modifier::BOLD),
        )),
    };

    frame.render_widget(Paragraph::new(line).style(bg), area);
}
