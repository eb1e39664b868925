use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use chrono_tz::Tz;
use listview::ViewPhase;

use crate::{
    app::{AppState, TransactionsState},
    model::{KIND_CREDIT, KIND_DEBIT, WalletTransaction},
    ui::{components::chips::chip_row, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Type chips
            Constraint::Min(0),    // List
        ])
        .split(area);

    render_header(frame, layout[0], &state.transactions, &theme);
    render_kind_chips(frame, layout[1], &state.transactions, &theme);
    render_list(frame, layout[2], &state.transactions, state.tz, &theme);
}

pub(super) fn render_header(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &TransactionsState,
    theme: &Theme,
) {
    let aggregate = state.controller.aggregate();
    let mut line = vec![
        Span::styled("Credit", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(
            format!("+{}", aggregate.sum(KIND_CREDIT)),
            Style::default().fg(theme.positive),
        ),
        Span::raw("   "),
        Span::styled("Debit", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(
            format!("-{}", aggregate.sum(KIND_DEBIT)),
            Style::default().fg(theme.negative),
        ),
        Span::raw("   "),
    ];

    let query = state.controller.filter().query.as_str();
    if !query.is_empty() || state.search_active {
        line.push(Span::styled("Search", Style::default().fg(theme.dim)));
        line.push(Span::raw(": "));
        let shown = if query.is_empty() { "…" } else { query };
        let mut style = Style::default().fg(theme.text);
        if state.search_active {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        line.push(Span::styled(shown.to_string(), style));
        line.push(Span::raw("   "));
    }

    if let Some(err) = state.controller.error() {
        line.push(Span::styled(
            err.message.as_str(),
            Style::default().fg(theme.error),
        ));
    } else {
        line.push(Span::styled(
            "Ctrl+F: search  f: type filter",
            Style::default().fg(theme.dim),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Transactions");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_kind_chips(frame: &mut Frame<'_>, area: Rect, state: &TransactionsState, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(chip_row(
            "Type",
            &[KIND_CREDIT, KIND_DEBIT],
            state.controller.filter().status.label(),
            theme,
        )),
        area,
    );
}

pub(super) fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &TransactionsState,
    tz: Tz,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if state.controller.phase() == ViewPhase::Loading && !state.controller.has_loaded() {
        frame.render_widget(
            Paragraph::new(Line::from("Loading transactions…"))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .controller
        .visible()
        .map(|tx| transaction_row(tx, tz, theme))
        .collect();

    if items.is_empty() {
        let message = if state.controller.filter().is_default() {
            "No transactions found"
        } else {
            "No transactions match the active filters"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(theme.dim),
            )))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn transaction_row(tx: &WalletTransaction, tz: Tz, theme: &Theme) -> ListItem<'static> {
    let (chip, chip_color, amount_sign) = if tx.is_credit() {
        ("[CR]", theme.positive, "+")
    } else {
        ("[DR]", theme.negative, "-")
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<12}", tx.date_label(tz)),
            Style::default().fg(theme.dim),
        ),
        Span::styled(
            chip,
            Style::default().fg(chip_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {amount_sign}{:<12}", tx.amount.to_string()),
            Style::default().fg(chip_color),
        ),
        Span::raw(" "),
        Span::styled(
            tx.description.clone().unwrap_or_default(),
            Style::default().fg(theme.text),
        ),
    ]))
}
