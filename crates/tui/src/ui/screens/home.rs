use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use listview::Phase;

use crate::{
    app::AppState,
    model::Dashboard,
    ui::{
        components::{card::{Card, StatCard}, charts::ascii_bar},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let totals = &state.dashboard.totals;

    match totals.phase() {
        Phase::Idle | Phase::Loading => {
            render_notice(frame, area, &theme, "Loading dashboard…", theme.dim);
        }
        Phase::Failure => {
            let message = totals
                .error()
                .map(|err| err.message.clone())
                .unwrap_or_else(|| "Dashboard unavailable.".to_string());
            render_notice(
                frame,
                area,
                &theme,
                &format!("{message}  (r to retry)"),
                theme.error,
            );
        }
        Phase::Success => {
            if let Some(dashboard) = totals.data() {
                render_dashboard(frame, area, dashboard, &theme);
            }
        }
    }
}

fn render_notice(frame: &mut Frame<'_>, area: Rect, theme: &Theme, message: &str, color: ratatui::style::Color) {
    let card = Card::new("Dashboard", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);
    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(color)))
            .alignment(Alignment::Center),
        inner,
    );
}

fn render_dashboard(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Counts
            Constraint::Length(3), // Revenue and network
            Constraint::Min(4),    // Monthly sales
            Constraint::Length(8), // Recent activity
        ])
        .split(area);

    render_count_cards(frame, layout[0], dashboard, theme);
    render_network_cards(frame, layout[1], dashboard, theme);

    let series = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[2]);
    render_sales(frame, series[0], dashboard, theme);
    render_revenue(frame, series[1], dashboard, theme);

    render_activity(frame, layout[3], dashboard, theme);
}

fn three_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area)
}

fn render_count_cards(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let cols = three_columns(area);
    StatCard::new("Total WECs", dashboard.total_contracts.to_string(), theme)
        .render(frame, cols[0]);
    StatCard::new(
        "Active Contracts",
        dashboard.active_contracts.to_string(),
        theme,
    )
    .value_style(Style::default().fg(theme.positive))
    .render(frame, cols[1]);
    StatCard::new(
        "Expiring This Month",
        dashboard.expiring_this_month.to_string(),
        theme,
    )
    .value_style(Style::default().fg(theme.warning))
    .render(frame, cols[2]);
}

fn render_network_cards(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let cols = three_columns(area);
    StatCard::new("Total Revenue", dashboard.revenue.to_string(), theme)
        .value_style(Style::default().fg(theme.positive))
        .render(frame, cols[0]);
    StatCard::new("Distributors", dashboard.distributors.to_string(), theme)
        .render(frame, cols[1]);
    StatCard::new("Retailers", dashboard.retailers.to_string(), theme).render(frame, cols[2]);
}

fn render_sales(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let card = Card::new("Monthly WEC Sales", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if dashboard.monthly_sales.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No sales data",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let max = dashboard
        .monthly_sales
        .iter()
        .map(|(_, value)| *value)
        .max()
        .unwrap_or(0);
    let bar_width = (inner.width as usize).saturating_sub(16).min(32);

    let items: Vec<ListItem> = dashboard
        .monthly_sales
        .iter()
        .take(inner.height as usize)
        .map(|(month, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{month:<5}"), Style::default().fg(theme.dim)),
                Span::styled(
                    ascii_bar(*value, max, bar_width),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(format!(" {value}"), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_revenue(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let card = Card::new("Monthly Revenue", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if dashboard.monthly_revenue.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No revenue data",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let max = dashboard
        .monthly_revenue
        .iter()
        .map(|(_, value)| value.paise().max(0) as u64)
        .max()
        .unwrap_or(0);
    let bar_width = (inner.width as usize).saturating_sub(20).min(24);

    let items: Vec<ListItem> = dashboard
        .monthly_revenue
        .iter()
        .take(inner.height as usize)
        .map(|(month, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{month:<5}"), Style::default().fg(theme.dim)),
                Span::styled(
                    ascii_bar(value.paise().max(0) as u64, max, bar_width),
                    Style::default().fg(theme.positive),
                ),
                Span::styled(format!(" {value}"), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_activity(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let card = Card::new("Recent Activity", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if dashboard.activities.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No recent activities found",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = dashboard
        .activities
        .iter()
        .take(inner.height as usize)
        .map(|activity| {
            ListItem::new(Line::from(vec![
                Span::styled(activity.action.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                Span::styled(
                    format!("{} • {}", activity.user, activity.time),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}
