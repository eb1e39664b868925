use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use listview::{STATUS_ACTIVE, STATUS_EXPIRED, STATUS_EXPIRING_SOON, ViewPhase};

use crate::{
    app::{AppState, ContractsMode, ContractsState},
    form::{ContractForm, FormField, GST_RATE_PERCENT},
    model::Contract,
    ui::{
        components::{card::StatCard, chips::chip_row},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let contracts = &state.contracts;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header: search, notice, error
            Constraint::Length(3), // Summary cards
            Constraint::Length(2), // Filter chips
            Constraint::Min(0),    // List or form
        ])
        .split(area);

    render_header(frame, layout[0], contracts, &theme);
    render_summary(frame, layout[1], contracts, &theme);
    render_chips(frame, layout[2], contracts, &theme);

    match contracts.mode {
        ContractsMode::List => render_list(frame, layout[3], contracts, &theme),
        ContractsMode::Create => render_form(frame, layout[3], &contracts.form, &theme),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &ContractsState, theme: &Theme) {
    let mut line = Vec::new();

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

    line.push(Span::styled(
        "Ctrl+F: search by name or WEC id",
        Style::default().fg(theme.dim),
    ));

    if let Some(notice) = state.notice.as_ref() {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            notice.as_str(),
            Style::default().fg(theme.positive),
        ));
    }
    if let Some(err) = state.controller.error() {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            err.message.as_str(),
            Style::default().fg(theme.error),
        ));
        if err.retryable {
            line.push(Span::styled(
                "  (r to retry)",
                Style::default().fg(theme.dim),
            ));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("WEC Management");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &ContractsState, theme: &Theme) {
    let aggregate = state.controller.aggregate();
    let cards = 1 + state.status_options().len();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards as u32); cards])
        .split(area);

    StatCard::new("Total WECs", aggregate.total.to_string(), theme).render(frame, cols[0]);
    for (i, status) in state.status_options().iter().copied().enumerate() {
        StatCard::new(status, aggregate.count(status).to_string(), theme)
            .value_style(Style::default().fg(status_color(status, theme)))
            .render(frame, cols[i + 1]);
    }
}

fn render_chips(frame: &mut Frame<'_>, area: Rect, state: &ContractsState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let filter = state.controller.filter();
    frame.render_widget(
        Paragraph::new(chip_row(
            "Status  ",
            state.status_options(),
            filter.status.label(),
            theme,
        )),
        rows[0],
    );

    let categories = state.category_options();
    let refs: Vec<&str> = categories.iter().map(String::as_str).collect();
    frame.render_widget(
        Paragraph::new(chip_row("Category", &refs, filter.category.label(), theme)),
        rows[1],
    );
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &ContractsState, theme: &Theme) {
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if state.controller.phase() == ViewPhase::Loading && !state.controller.has_loaded() {
        let loading = Paragraph::new(Line::from("Loading WEC data…"))
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(loading, area);
        return;
    }

    let items: Vec<ListItem> = state
        .controller
        .visible()
        .map(|contract| contract_row(contract, theme))
        .collect();

    if items.is_empty() {
        let query = state.controller.filter().query.trim();
        let mut lines = Vec::new();
        if !query.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("No results for "),
                Span::styled(format!("\"{query}\""), Style::default().fg(theme.accent)),
                Span::raw("."),
            ]));
            lines.push(Line::from(Span::styled(
                "Ctrl+F to edit • Esc to clear",
                Style::default().fg(theme.dim),
            )));
        } else if state.controller.rows().is_empty() {
            lines.push(Line::from(vec![
                Span::raw("No WEC found. Press "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" to create one."),
            ]));
        } else {
            lines.push(Line::from("No WEC matches the active filters."));
        }
        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty, area);
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));

    let list = List::new(items)
        .block(list_block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn contract_row(contract: &Contract, theme: &Theme) -> ListItem<'static> {
    let customer = contract.customer.as_deref().unwrap_or("-");
    let product = [
        contract.category.as_deref(),
        contract.brand.as_deref(),
        contract.model.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ");

    let window = match (contract.start_date, contract.end_date) {
        (Some(start), Some(end)) => format!("{start} → {end}"),
        (None, Some(end)) => format!("→ {end}"),
        _ => "-".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            format!("{:<8}", contract.id),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{customer:<22}"), Style::default().fg(theme.text)),
        Span::styled(format!("{product:<34}"), Style::default().fg(theme.text_muted)),
        Span::styled(format!("{window:<26}"), Style::default().fg(theme.dim)),
        Span::styled(
            format!("{:>12}", contract.amount.to_string()),
            Style::default().fg(theme.text),
        ),
        Span::raw(" "),
    ];

    if let Some(status) = contract.status {
        spans.push(Span::styled(
            format!("[{status}]"),
            Style::default()
                .fg(status_color(status, theme))
                .add_modifier(Modifier::BOLD),
        ));
        if status != STATUS_EXPIRED
            && let Some(days) = contract.days_left
        {
            spans.push(Span::styled(
                format!(" {days}d left"),
                Style::default().fg(theme.dim),
            ));
        }
    }

    ListItem::new(Line::from(spans))
}

fn render_form(frame: &mut Frame<'_>, area: Rect, form: &ContractForm, theme: &Theme) {
    let block = Block::default()
        .title("Create New WEC")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![section_title("Customer Information", theme)];
    for field in [
        FormField::Name,
        FormField::Email,
        FormField::Mobile,
        FormField::Address,
        FormField::Serial,
    ] {
        lines.push(text_field_line(form, field, theme));
    }

    lines.push(Line::default());
    lines.push(section_title("Product Information", theme));
    lines.push(picker_line(
        form,
        FormField::Category,
        form.category_label(),
        theme,
    ));
    lines.push(picker_line(form, FormField::Brand, form.brand_label(), theme));
    lines.push(picker_line(
        form,
        FormField::ProductType,
        form.product_type_label(),
        theme,
    ));
    lines.push(text_field_line(form, FormField::Model, theme));
    lines.push(text_field_line(form, FormField::PurchaseValue, theme));
    lines.push(picker_line(
        form,
        FormField::Proof,
        form.proof.as_deref().unwrap_or("none"),
        theme,
    ));

    if let Some((base, gst, total)) = form.totals() {
        lines.push(Line::from(vec![
            Span::styled("Total    ", Style::default().fg(theme.dim)),
            Span::styled(
                format!("{base} + GST {GST_RATE_PERCENT}% {gst} = {total}"),
                Style::default().fg(theme.positive),
            ),
        ]));
    }

    lines.push(Line::from(Span::styled(
        "Enter: create • Tab: next • ↑/↓: pick • Esc: cancel",
        Style::default().fg(theme.dim),
    )));

    if let Some(err) = form.error.as_ref() {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn section_title(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    ))
}

fn text_field_line(form: &ContractForm, field: FormField, theme: &Theme) -> Line<'static> {
    let focused = form.focus == field;
    let cursor = if focused { "│" } else { "" };
    field_line(
        field.label(),
        format!("{}{cursor}", form.text_value(field)),
        focused,
        theme,
    )
}

fn picker_line(form: &ContractForm, field: FormField, value: &str, theme: &Theme) -> Line<'static> {
    let focused = form.focus == field;
    let shown = if focused {
        format!("‹ {value} ›")
    } else {
        value.to_string()
    };
    field_line(field.label(), shown, focused, theme)
}

fn field_line(label: &str, value: String, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    Line::from(vec![
        Span::styled(format!("{label:<16}"), label_style),
        Span::raw(" "),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn status_color(status: &str, theme: &Theme) -> ratatui::style::Color {
    match status {
        STATUS_ACTIVE => theme.positive,
        STATUS_EXPIRED => theme.negative,
        STATUS_EXPIRING_SOON => theme.warning,
        _ => theme.dim,
    }
}
