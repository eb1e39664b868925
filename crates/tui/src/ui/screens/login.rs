use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::theme::Theme,
};

fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_box(38, 6, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" wecdesk login ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;
    render_input(
        frame,
        rows[0],
        "email",
        &login.email,
        false,
        login.focus == LoginField::Email,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "password",
        &login.password,
        true,
        login.focus == LoginField::Password,
        &theme,
    );

    let hint_area = Rect {
        x: card_area.x,
        y: card_area.y + card_area.height,
        width: card_area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Tab: switch  Enter: sign in",
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center),
        hint_area,
    );

    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x.saturating_sub(8),
            y: card_area.y + card_area.height + 1,
            width: card_area.width + 16,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if is_password {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let label_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };
    let value_style = if focused {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.text_muted)
    };

    frame.render_widget(
        Paragraph::new(ratatui::text::Line::from(vec![
            Span::styled(format!("{label:<9}"), label_style),
            Span::styled(format!("{shown}{cursor}"), value_style),
        ])),
        area,
    );
}
