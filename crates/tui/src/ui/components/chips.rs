use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// One row of filter chips: `Status: [All] Active Expired`, with the
/// active choice highlighted. `active == None` highlights "All".
pub fn chip_row<'a>(
    label: &'a str,
    options: &[&str],
    active: Option<&str>,
    theme: &Theme,
) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!("{label}: "), Style::default().fg(theme.dim)),
        chip("All", active.is_none(), theme),
    ];
    for option in options {
        spans.push(Span::raw(" "));
        spans.push(chip(option, active == Some(*option), theme));
    }
    Line::from(spans)
}

fn chip(label: &str, selected: bool, theme: &Theme) -> Span<'static> {
    if selected {
        Span::styled(
            format!("[{label}]"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {label} "), Style::default().fg(theme.text_muted))
    }
}
