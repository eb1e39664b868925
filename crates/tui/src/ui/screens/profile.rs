use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card = Card::new("Profile", &theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(user) = state.user.as_ref() else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Not signed in.",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    };

    let lines = vec![
        detail_line("Name", user.name.as_deref().unwrap_or("-"), &theme),
        detail_line("Email", user.email.as_deref().unwrap_or("-"), &theme),
        detail_line("Mobile", user.mobile.as_deref().unwrap_or("-"), &theme),
        detail_line("Role", user.role.as_deref().unwrap_or("-"), &theme),
        detail_line("Server", &state.base_url, &theme),
        Line::default(),
        Line::from(vec![
            Span::styled("o", Style::default().fg(theme.accent)),
            Span::raw(" log out"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn detail_line(label: &str, value: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<8}"), Style::default().fg(theme.dim)),
        Span::styled(value.to_string(), Style::default().fg(theme.text)),
    ])
}
