use crate::config::AppConfig;
use crate::squeezer::format;
use crate::squeezer::stages::StagePipeline;
use crate::squeezer::{CitrusObject, LemonId, SqueezerStore};
use chrono::Local;
use std::collections::VecDeque;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityKind {
    Info,
    Juice,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ActivityLine {
    pub timestamp: String,
    pub text: String,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Lemons,
    Input,
}

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => return,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.text = self.history[idx].clone();
        self.cursor = self.text.len();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.text = self.history[i + 1].clone();
                self.cursor = self.text.len();
            }
            Some(_) => self.clear(),
            None => {}
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub store: SqueezerStore,
    pub selected: usize,
    pub focus: FocusPanel,
    pub input: InputState,
    pub activity: VecDeque<ActivityLine>,
    pub stage: Option<StagePipeline>,
    pub motivation: &'static str,
    pub fun_fact: usize,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(mut config: AppConfig, store: SqueezerStore) -> Self {
        config.ui.normalize();
        Self {
            config,
            store,
            selected: 0,
            focus: FocusPanel::Lemons,
            input: InputState::new(),
            activity: VecDeque::new(),
            stage: None,
            motivation: format::motivation(),
            fun_fact: 0,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    /// Add the configured starting lemon, if any.
    pub fn seed_starting_lemon(&mut self) -> Option<LemonId> {
        let size = self.config.squeeze.starting_lemon()?;
        Some(self.store.add_object(size))
    }

    pub fn selected_lemon(&self) -> Option<&CitrusObject> {
        self.store.objects().get(self.selected)
    }

    /// Lemon at 1-based list position `index`, or the selected lemon.
    pub fn lemon_at(&self, index: Option<usize>) -> Option<&CitrusObject> {
        match index {
            Some(i) => self.store.objects().get(i.checked_sub(1)?),
            None => self.selected_lemon(),
        }
    }

    pub fn select_next(&mut self) {
        let len = self.store.objects().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.dirty = true;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.store.objects().len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
            self.dirty = true;
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.store.objects().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn push_activity(&mut self, kind: ActivityKind, text: String) {
        let now = Local::now();
        let mut timestamp = String::new();
        if write!(timestamp, "{}", now.format(&self.config.ui.timestamp_format)).is_err() {
            self.config.ui.normalize();
            timestamp.clear();
            let _ = write!(timestamp, "{}", now.format(&self.config.ui.timestamp_format));
        }
        self.activity.push_back(ActivityLine {
            timestamp,
            text,
            kind,
        });
        while self.activity.len() > self.config.ui.max_activity.max(1) {
            self.activity.pop_front();
        }
        self.dirty = true;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push_activity(ActivityKind::Info, text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push_activity(ActivityKind::Warning, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push_activity(ActivityKind::Error, text.into());
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Lemons => FocusPanel::Input,
            FocusPanel::Input => FocusPanel::Lemons,
        };
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        let collection = self.store.collection();
        format!(
            "Lemons: {} | Juice: {} | Used: {} | Quality: {}",
            self.store.objects().len(),
            format::format_juice(collection.total_amount),
            collection.lemons_used,
            collection.quality
        )
    }

    pub fn current_fun_fact(&self) -> &'static str {
        format::FUN_FACTS[self.fun_fact % format::FUN_FACTS.len()]
    }
}
