pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, ContractsMode, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Home => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Home => screens::home::render(frame, layout[2], state),
        Section::Contracts => screens::contracts::render(frame, layout[2], state),
        Section::Transactions => screens::transactions::render(frame, layout[2], state),
        Section::Wallet => screens::wallet::render(frame, layout[2], state),
        Section::Profile => screens::profile::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref())
        .unwrap_or("-");
    let role = state
        .user
        .as_ref()
        .and_then(|u| u.role.as_deref())
        .unwrap_or("-");

    let line = Line::from(vec![
        Span::styled("wecdesk", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Role", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {role}  ")),
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}", state.base_url)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(key, Style::default().fg(theme.accent)),
            Span::raw(format!(" {label}  ")),
        ]
    };

    match state.section {
        Section::Home => hint("r", "refresh").to_vec(),
        Section::Contracts => match state.contracts.mode {
            ContractsMode::List => [
                hint("n", "new WEC"),
                hint("s", "status"),
                hint("g", "category"),
                hint("r", "refresh"),
                hint("j/k", "select"),
            ]
            .concat(),
            ContractsMode::Create => [
                hint("Enter", "create"),
                hint("Tab", "next"),
                hint("Esc", "cancel"),
            ]
            .concat(),
        },
        Section::Transactions => [
            hint("f", "type"),
            hint("r", "refresh"),
            hint("j/k", "select"),
        ]
        .concat(),
        Section::Wallet => [
            hint("f", "type"),
            hint("r", "refresh"),
            hint("j/k", "select"),
        ]
        .concat(),
        Section::Profile => hint("o", "log out").to_vec(),
    }
}
