mod activity;
mod control_panel;
mod input_box;
mod juice_display;
mod layout;
mod lemon_list;
mod stage_bar;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    stage_bar::render(frame, app_layout.stage_bar, state);
    lemon_list::render(frame, app_layout.lemon_list, state);
    activity::render(frame, app_layout.activity, state);
    input_box::render(frame, app_layout.input_box, state);
    juice_display::render(frame, app_layout.juice_display, state);
    control_panel::render(frame, app_layout.control_panel, state);
    status_bar::render(frame, app_layout.status_bar, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::squeezer::stages::StagePipeline;
    use crate::squeezer::{CitrusSize, SqueezerStore};
    use ratatui::backend::TestBackend;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_empty_store() {
        let state = AppState::new(AppConfig::default(), SqueezerStore::with_random(|| 0.0));
        let screen = draw(&state);
        assert!(screen.contains("No lemons yet"));
        assert!(screen.contains("0.0ml"));
        assert!(screen.contains("[READY]"));
        assert!(!screen.contains("Good Quality"));
    }

    #[test]
    fn test_renders_squeeze_results() {
        let mut state = AppState::new(AppConfig::default(), SqueezerStore::with_random(|| 0.5));
        let id = state.store.add_object(CitrusSize::Medium);
        state.store.add_object(CitrusSize::Large);
        let ticket = state.store.squeeze_object(id).unwrap();
        state.store.complete_squeeze(ticket);

        let screen = draw(&state);
        assert!(screen.contains("Lemons (2)"));
        assert!(screen.contains("40.0ml"));
        assert!(screen.contains("Excellent Quality"));
        assert!(screen.contains("Squeeze!"));
    }

    #[test]
    fn test_renders_pending_squeeze_and_stage() {
        let mut state = AppState::new(AppConfig::default(), SqueezerStore::with_random(|| 0.5));
        let id = state.store.add_object(CitrusSize::Small);
        state.stage = Some(StagePipeline::new(id, state.config.stages.clone()));
        state.store.squeeze_object(id);

        let screen = draw(&state);
        assert!(screen.contains("Squeezing..."));
        assert!(screen.contains("[SQUEEZING]"));
        assert!(screen.contains("Wash"));
    }
}
