use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::session::Snapshot;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    date_str: &str,
    clock: &str,
    notifications: bool,
) {
    let city_line = Line::from(vec![Span::styled(
        snapshot.location.city.to_uppercase(),
        theme::accent().add_modifier(Modifier::BOLD),
    )]);

    let country_line = Line::from(Span::styled(
        snapshot.location.country_name.as_str(),
        theme::dim(),
    ));

    let mut date_spans = vec![Span::styled(date_str, theme::dim())];
    if !snapshot.hijri.is_empty() {
        date_spans.push(Span::styled("  ·  ", theme::dim()));
        date_spans.push(Span::styled(snapshot.hijri.as_str(), theme::amber()));
    }

    let clock_line = Line::from(Span::styled(clock, theme::bold()));

    let (bell, bell_style) = if notifications {
        ("notifications on", theme::accent())
    } else {
        ("notifications off", theme::dim())
    };
    let meta_line = Line::from(vec![
        Span::styled(snapshot.method_label.as_str(), theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(bell, bell_style),
    ]);

    let text = vec![
        city_line,
        country_line,
        Line::from(""),
        Line::from(date_spans),
        clock_line,
        meta_line,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent())
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
