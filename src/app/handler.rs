use crate::app::action::Action;
use crate::app::commands::{self, ParsedCommand, HELP_LINES};
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::squeezer::format;
use crate::squeezer::stages::{StagePipeline, StageProgress};
use crate::squeezer::store::SqueezeError;
use crate::squeezer::{CitrusSize, SqueezeTicket, StoreChange};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

const MOTIVATION_TICKS: u64 = 200;
const FUN_FACT_TICKS: u64 = 300;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::Store(change) => {
            apply_store_change(state, &change);
            vec![]
        }
        AppEvent::SqueezeElapsed(ticket) => {
            complete_squeeze(state, ticket);
            vec![]
        }
        AppEvent::Tick => {
            handle_tick(state);
            vec![]
        }
    }
}

fn handle_tick(state: &mut AppState) {
    state.tick_count = state.tick_count.wrapping_add(1);

    // Spinner frames while a squeeze is in flight
    if state.store.is_squeezing() {
        state.dirty = true;
    }
    if state.tick_count % MOTIVATION_TICKS == 0 && state.config.ui.show_motivation {
        state.motivation = format::motivation();
        state.dirty = true;
    }
    if state.tick_count % FUN_FACT_TICKS == 0 && state.config.ui.fun_facts {
        state.fun_fact = state.fun_fact.wrapping_add(1);
        state.dirty = true;
    }
}

/// Mirror a store change into the activity feed and the stage pipeline.
fn apply_store_change(state: &mut AppState, change: &StoreChange) {
    let kind = match change {
        StoreChange::SqueezeCompleted { .. } => ActivityKind::Juice,
        StoreChange::SqueezeAbandoned { .. } => ActivityKind::Warning,
        _ => ActivityKind::Info,
    };
    state.push_activity(kind, format::describe_change(change));

    match change {
        StoreChange::SqueezeCompleted { id, .. } => {
            if let Some(stage) = state.stage.as_mut() {
                if stage.lemon() == *id {
                    stage.mark_done();
                }
            }
            if state.config.ui.show_motivation {
                state.motivation = format::motivation();
            }
        }
        StoreChange::SqueezeAbandoned { id } | StoreChange::Removed { id } => {
            if state.stage.as_ref().map(|s| s.lemon()) == Some(*id) {
                state.stage = None;
            }
        }
        StoreChange::Reset => state.stage = None,
        _ => {}
    }
    state.clamp_selection();
    state.dirty = true;
}

fn complete_squeeze(state: &mut AppState, ticket: SqueezeTicket) {
    if state.store.complete_squeeze(ticket).is_none() {
        debug!(id = %ticket.id, "stale squeeze timer ignored");
    }
    state.dirty = true;
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    if key.code == KeyCode::Tab {
        state.toggle_focus();
        return vec![];
    }

    match state.focus {
        FocusPanel::Lemons => handle_lemon_key(state, key),
        FocusPanel::Input => handle_input_key(state, key),
    }
}

fn handle_lemon_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('1') => add_lemons(state, CitrusSize::Small, 1),
        KeyCode::Char('2') => add_lemons(state, CitrusSize::Medium, 1),
        KeyCode::Char('3') => add_lemons(state, CitrusSize::Large, 1),
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            vec![]
        }
        KeyCode::Home => {
            state.selected = 0;
            vec![]
        }
        KeyCode::End => {
            state.selected = state.store.objects().len().saturating_sub(1);
            vec![]
        }
        KeyCode::Char('s') | KeyCode::Enter => squeeze_lemon(state, None),
        KeyCode::Char('d') | KeyCode::Delete => remove_lemon(state, None),
        KeyCode::Char('r') => reset(state),
        KeyCode::Char('g') => toggle_stage(state),
        KeyCode::Char(' ') => stage_click(state),
        KeyCode::Char('/') => {
            state.focus = FocusPanel::Input;
            state.input.clear();
            state.input.insert_char('/');
            vec![]
        }
        KeyCode::Char('?') => {
            show_help(state);
            vec![]
        }
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            state.focus = FocusPanel::Lemons;
            if text.trim().is_empty() {
                return vec![];
            }
            run_command(state, &text)
        }
        KeyCode::Esc => {
            state.input.clear();
            state.focus = FocusPanel::Lemons;
            vec![]
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Up => {
            state.input.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.input.history_down();
            vec![]
        }
        KeyCode::Char(c) => {
            state.input.insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}

pub fn run_command(state: &mut AppState, text: &str) -> Vec<Action> {
    match commands::parse_command(text) {
        Ok(ParsedCommand::Add { size, count }) => add_lemons(state, size, count),
        Ok(ParsedCommand::Squeeze { index }) => squeeze_lemon(state, index),
        Ok(ParsedCommand::Remove { index }) => remove_lemon(state, index),
        Ok(ParsedCommand::Reset) => reset(state),
        Ok(ParsedCommand::Stage) => toggle_stage(state),
        Ok(ParsedCommand::Help) => {
            show_help(state);
            vec![]
        }
        Ok(ParsedCommand::Quit) => vec![Action::Quit],
        Err(e) => {
            state.error(e.to_string());
            vec![]
        }
    }
}

fn show_help(state: &mut AppState) {
    for line in HELP_LINES {
        state.info(*line);
    }
}

fn add_lemons(state: &mut AppState, size: CitrusSize, count: u32) -> Vec<Action> {
    for _ in 0..count {
        state.store.add_object(size);
    }
    state.selected = state.store.objects().len().saturating_sub(1);
    vec![]
}

/// Squeeze the lemon at `index` (1-based) or the selected one. Ignored while
/// another squeeze is in flight.
fn squeeze_lemon(state: &mut AppState, index: Option<usize>) -> Vec<Action> {
    if state.store.is_squeezing() {
        return vec![];
    }
    let Some(id) = state.lemon_at(index).map(|l| l.id) else {
        state.warn(match index {
            Some(i) => format!("No lemon at position {}", i),
            None => "No lemon selected, press 1, 2 or 3 to add one".to_string(),
        });
        return vec![];
    };
    match state.store.try_squeeze_object(id) {
        Ok(ticket) => vec![Action::ScheduleSqueeze { ticket }],
        Err(SqueezeError::AlreadySqueezed(_)) => {
            state.warn(format!("Lemon [{}] is already squeezed", id));
            vec![]
        }
        Err(e) => {
            debug!(%id, error = %e, "squeeze refused");
            vec![]
        }
    }
}

fn remove_lemon(state: &mut AppState, index: Option<usize>) -> Vec<Action> {
    match state.lemon_at(index).map(|l| l.id) {
        Some(id) => {
            state.store.remove_object(id);
            state.clamp_selection();
        }
        None => {
            if let Some(i) = index {
                state.warn(format!("No lemon at position {}", i));
            }
        }
    }
    vec![]
}

fn reset(state: &mut AppState) -> Vec<Action> {
    state.store.reset();
    state.stage = None;
    state.selected = 0;
    state.seed_starting_lemon();
    vec![Action::CancelSqueezes]
}

fn toggle_stage(state: &mut AppState) -> Vec<Action> {
    if state.stage.take().is_some() {
        state.info("Stage mode off");
        return vec![];
    }
    let unsqueezed = state
        .selected_lemon()
        .filter(|lemon| !lemon.squeezed)
        .map(|lemon| lemon.id);
    let target = match unsqueezed {
        Some(id) => id,
        None => {
            let size = state.config.squeeze.starting_size;
            let id = state.store.add_object(size);
            state.selected = state.store.objects().len().saturating_sub(1);
            id
        }
    };
    state.stage = Some(StagePipeline::new(target, state.config.stages.clone()));
    state.info(format!("Stage mode on for lemon [{}], press space to work", target));
    vec![]
}

fn stage_click(state: &mut AppState) -> Vec<Action> {
    let Some(stage) = state.stage.as_mut() else {
        return vec![];
    };
    match stage.click() {
        StageProgress::Continue { .. } => vec![],
        StageProgress::Advanced(next) => {
            let hint = next.hint();
            state.info(format!("{}: {}", next.verb(), hint));
            vec![]
        }
        StageProgress::ReadyToSqueeze => {
            let lemon = stage.lemon();
            match state.store.try_squeeze_object(lemon) {
                Ok(ticket) => vec![Action::ScheduleSqueeze { ticket }],
                Err(e) => {
                    if let Some(stage) = state.stage.as_mut() {
                        stage.retry_squeeze();
                    }
                    state.warn(format!("Cannot squeeze yet: {}", e));
                    vec![]
                }
            }
        }
        StageProgress::Finished => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::squeezer::stages::{Stage, StageClicks};
    use crate::squeezer::{JuiceQuality, SqueezerStore};

    fn state() -> AppState {
        let mut cfg = AppConfig::default();
        cfg.squeeze.start_with_lemon = false;
        AppState::new(cfg, SqueezerStore::with_random(|| 0.5))
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn press(state: &mut AppState, code: KeyCode) -> Vec<Action> {
        handle_event(state, key(code))
    }

    fn ticket_of(actions: &[Action]) -> SqueezeTicket {
        match actions {
            [Action::ScheduleSqueeze { ticket }] => *ticket,
            other => panic!("expected a scheduled squeeze, got {:?}", other),
        }
    }

    #[test]
    fn test_number_keys_add_lemons() {
        let mut s = state();
        press(&mut s, KeyCode::Char('1'));
        press(&mut s, KeyCode::Char('2'));
        press(&mut s, KeyCode::Char('3'));
        let sizes: Vec<_> = s.store.objects().iter().map(|l| l.size).collect();
        assert_eq!(sizes, vec![CitrusSize::Small, CitrusSize::Medium, CitrusSize::Large]);
        assert_eq!(s.selected, 2);
    }

    #[test]
    fn test_squeeze_key_schedules_and_completes() {
        let mut s = state();
        press(&mut s, KeyCode::Char('2'));
        let ticket = ticket_of(&press(&mut s, KeyCode::Char('s')));
        assert!(s.store.is_squeezing());

        // Input is ignored while the squeeze is in flight
        assert!(press(&mut s, KeyCode::Char('s')).is_empty());

        handle_event(&mut s, AppEvent::SqueezeElapsed(ticket));
        let lemon = &s.store.objects()[0];
        assert!(lemon.squeezed);
        assert_eq!(lemon.extracted, 40.0);
        assert_eq!(s.store.collection().quality, JuiceQuality::Excellent);
        assert!(!s.store.is_squeezing());
    }

    #[test]
    fn test_squeeze_already_squeezed_warns() {
        let mut s = state();
        press(&mut s, KeyCode::Char('1'));
        let ticket = ticket_of(&press(&mut s, KeyCode::Enter));
        handle_event(&mut s, AppEvent::SqueezeElapsed(ticket));
        assert!(press(&mut s, KeyCode::Enter).is_empty());
        assert_eq!(s.activity.back().unwrap().kind, ActivityKind::Warning);
    }

    #[test]
    fn test_reset_cancels_and_reseeds() {
        let mut cfg = AppConfig::default();
        cfg.squeeze.starting_size = CitrusSize::Large;
        let mut s = AppState::new(cfg, SqueezerStore::with_random(|| 0.5));
        s.seed_starting_lemon();
        let ticket = ticket_of(&press(&mut s, KeyCode::Char('s')));

        let actions = press(&mut s, KeyCode::Char('r'));
        assert_eq!(actions, vec![Action::CancelSqueezes]);
        assert_eq!(s.store.objects().len(), 1);
        assert_eq!(s.store.objects()[0].size, CitrusSize::Large);
        assert!(!s.store.is_squeezing());

        // A timer that slipped through must not touch the new lemon
        handle_event(&mut s, AppEvent::SqueezeElapsed(ticket));
        assert!(!s.store.objects()[0].squeezed);
        assert_eq!(s.store.collection().lemons_used, 0);
    }

    #[test]
    fn test_remove_key_keeps_totals() {
        let mut s = state();
        press(&mut s, KeyCode::Char('2'));
        let ticket = ticket_of(&press(&mut s, KeyCode::Char('s')));
        handle_event(&mut s, AppEvent::SqueezeElapsed(ticket));
        press(&mut s, KeyCode::Char('d'));
        assert!(s.store.objects().is_empty());
        assert_eq!(s.store.collection().total_amount, 40.0);
        assert_eq!(s.store.collection().lemons_used, 1);
    }

    #[test]
    fn test_commands_via_input() {
        let mut s = state();
        press(&mut s, KeyCode::Char('/'));
        assert_eq!(s.focus, FocusPanel::Input);
        for c in "add small 2".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.focus, FocusPanel::Lemons);
        assert_eq!(s.store.objects().len(), 2);

        let actions = run_command(&mut s, "/squeeze 2");
        let ticket = ticket_of(&actions);
        assert_eq!(ticket.id, s.store.objects()[1].id);

        run_command(&mut s, "/blend");
        assert_eq!(s.activity.back().unwrap().kind, ActivityKind::Error);

        run_command(&mut s, "/remove 5");
        assert_eq!(s.activity.back().unwrap().kind, ActivityKind::Warning);
        assert_eq!(run_command(&mut s, "/quit"), vec![Action::Quit]);
    }

    #[test]
    fn test_store_changes_feed_activity() {
        let mut s = state();
        let id = s.store.add_object(CitrusSize::Small);
        handle_event(&mut s, AppEvent::Store(StoreChange::Added { id, size: CitrusSize::Small }));
        assert_eq!(s.activity.len(), 1);
        assert_eq!(s.activity[0].kind, ActivityKind::Info);
        handle_event(
            &mut s,
            AppEvent::Store(StoreChange::SqueezeCompleted {
                id,
                extracted: 24.0,
                quality: JuiceQuality::Excellent,
            }),
        );
        assert_eq!(s.activity[1].kind, ActivityKind::Juice);
    }

    #[test]
    fn test_stage_mode_round() {
        let mut cfg = AppConfig::default();
        cfg.squeeze.start_with_lemon = false;
        cfg.stages = StageClicks {
            wash: 1,
            dry: 1,
            peel: 1,
            slice: 1,
            align: 1,
            squeeze: 1,
        };
        let mut s = AppState::new(cfg, SqueezerStore::with_random(|| 0.0));

        press(&mut s, KeyCode::Char('g'));
        let lemon = s.stage.as_ref().unwrap().lemon();
        assert_eq!(s.store.objects().len(), 1);

        for _ in 0..5 {
            assert!(press(&mut s, KeyCode::Char(' ')).is_empty());
        }
        assert_eq!(s.stage.as_ref().unwrap().stage(), Stage::Squeeze);
        let ticket = ticket_of(&press(&mut s, KeyCode::Char(' ')));
        assert_eq!(ticket.id, lemon);

        handle_event(&mut s, AppEvent::SqueezeElapsed(ticket));
        let change = StoreChange::SqueezeCompleted {
            id: lemon,
            extracted: 30.0,
            quality: JuiceQuality::Good,
        };
        handle_event(&mut s, AppEvent::Store(change));
        assert_eq!(s.stage.as_ref().unwrap().stage(), Stage::Done);
        assert_eq!(s.store.collection().total_amount, 30.0);

        press(&mut s, KeyCode::Char('g'));
        assert!(s.stage.is_none());
    }

    #[test]
    fn test_removing_stage_lemon_ends_stage() {
        let mut s = state();
        press(&mut s, KeyCode::Char('g'));
        let id = s.stage.as_ref().unwrap().lemon();
        s.store.remove_object(id);
        handle_event(&mut s, AppEvent::Store(StoreChange::Removed { id }));
        assert!(s.stage.is_none());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut s = state();
        let ev = AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(handle_event(&mut s, ev), vec![Action::Quit]);
        assert_eq!(press(&mut s, KeyCode::Char('q')), vec![Action::Quit]);
    }
}
