use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use listview::Phase;

use crate::{
    app::AppState,
    ui::{
        components::card::{Card, StatCard},
        theme::Theme,
    },
};

use super::transactions;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Summary cards
            Constraint::Length(3), // Ledger header
            Constraint::Min(0),    // Ledger
        ])
        .split(area);

    render_summary(frame, layout[0], state, &theme);
    transactions::render_header(frame, layout[1], &state.wallet.transactions, &theme);
    transactions::render_list(
        frame,
        layout[2],
        &state.wallet.transactions,
        state.tz,
        &theme,
    );
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let summary = &state.wallet.summary;
    match summary.phase() {
        Phase::Success => {
            let totals = summary.data().copied().unwrap_or_default();
            StatCard::new("Total Balance", totals.balance.to_string(), theme)
                .value_style(Style::default().fg(theme.accent))
                .render(frame, cols[0]);
            StatCard::new("Total Credit", totals.credit.to_string(), theme)
                .value_style(Style::default().fg(theme.positive))
                .render(frame, cols[1]);
            StatCard::new("Total Debit", totals.debit.to_string(), theme)
                .value_style(Style::default().fg(theme.negative))
                .render(frame, cols[2]);
        }
        Phase::Idle | Phase::Loading => {
            for (col, title) in ["Total Balance", "Total Credit", "Total Debit"]
                .into_iter()
                .enumerate()
            {
                StatCard::new(title, "…", theme)
                    .value_style(Style::default().fg(theme.dim))
                    .render(frame, cols[col]);
            }
        }
        Phase::Failure => {
            let message = summary
                .error()
                .map(|err| err.message.clone())
                .unwrap_or_else(|| "Wallet summary unavailable.".to_string());
            let card = Card::new("Wallet", theme);
            let inner = card.inner(area);
            card.render_frame(frame, area);
            frame.render_widget(
                Paragraph::new(ratatui::text::Span::styled(
                    format!("{message}  (r to retry)"),
                    Style::default().fg(theme.error),
                )),
                inner,
            );
        }
    }
}
