use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub stage_bar: Rect,
    pub lemon_list: Rect,
    pub activity: Rect,
    pub input_box: Rect,
    pub juice_display: Rect,
    pub control_panel: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Horizontal: lemons | gap | juice and controls
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Min(30),    // Lemons and activity
            Constraint::Length(36), // Right panel
        ])
        .split(content);

    let left_panel = h_chunks[0];
    let right_panel = h_chunks[1];

    // Left panel: stage bar | lemon list | activity | input
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Stage bar
            Constraint::Min(5),    // Lemons
            Constraint::Length(8), // Activity feed
            Constraint::Length(3), // Input box
        ])
        .split(left_panel);

    // Right panel: juice glass | controls
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),    // Juice display
            Constraint::Length(13), // Control panel
        ])
        .split(right_panel);

    AppLayout {
        stage_bar: left_chunks[0],
        lemon_list: left_chunks[1],
        activity: left_chunks[2],
        input_box: left_chunks[3],
        juice_display: right_chunks[0],
        control_panel: right_chunks[1],
        status_bar,
    }
}
