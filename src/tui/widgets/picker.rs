use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::data::COUNTRIES;
use crate::session::Session;
use crate::tui::app::{CoordField, Picker, PickerFocus};
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, session: &Session, picker: &Picker) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(8),    // lists
            Constraint::Length(2), // notes
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Select Location",
            theme::accent().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Pick a country and city, or enter coordinates.",
            theme::dim(),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[1]);

    render_countries(frame, columns[0], session, picker);
    render_cities(frame, columns[1], session, picker);
    render_coordinates(frame, columns[2], session, picker);

    let mut notes = Vec::new();
    if let Some(snapshot) = &session.snapshot {
        notes.push(Line::from(vec![
            Span::styled("Currently showing ", theme::dim()),
            Span::styled(snapshot.location.city.as_str(), theme::bold()),
        ]));
    }
    frame.render_widget(Paragraph::new(notes).alignment(Alignment::Center), chunks[2]);
}

fn list_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface())
}

fn render_countries(frame: &mut Frame, area: Rect, session: &Session, picker: &Picker) {
    let items: Vec<ListItem> = COUNTRIES
        .iter()
        .map(|c| {
            let chosen = session.selected_country.as_deref() == Some(c.code);
            let style = if chosen { theme::next() } else { theme::bold() };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", c.code), theme::dim()),
                Span::styled(c.name, style),
            ]))
        })
        .collect();

    let focused = picker.focus == PickerFocus::Countries;
    let list = List::new(items)
        .block(list_block("Country", focused))
        .highlight_style(theme::accent().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(picker.country_idx));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_cities(frame: &mut Frame, area: Rect, session: &Session, picker: &Picker) {
    let focused = picker.focus == PickerFocus::Cities;
    if session.available_cities.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  Select a country first", theme::dim())),
        ])
        .block(list_block("City", focused));
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = session
        .available_cities
        .iter()
        .map(|c| {
            let chosen = session.selected_city.as_deref() == Some(c.name.as_str());
            let style = if chosen { theme::next() } else { theme::bold() };
            ListItem::new(Line::from(Span::styled(format!(" {}", c.name), style)))
        })
        .collect();

    let list = List::new(items)
        .block(list_block("City", focused))
        .highlight_style(theme::accent().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(picker.city_idx));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_coordinates(frame: &mut Frame, area: Rect, session: &Session, picker: &Picker) {
    let focused = picker.focus == PickerFocus::Coordinates;
    let field = |label: &'static str, value: &str, active: bool| {
        let cursor = if focused && active { "█" } else { "" };
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), theme::dim()),
            Span::styled(
                format!("{}{}", value, cursor),
                if focused && active {
                    theme::accent().add_modifier(Modifier::BOLD)
                } else {
                    theme::bold()
                },
            ),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field("Latitude", &picker.latitude, picker.coord_field == CoordField::Latitude),
        field("Longitude", &picker.longitude, picker.coord_field == CoordField::Longitude),
        Line::from(""),
        Line::from(Span::styled(
            "  [↑ ↓] field  [Enter] use",
            theme::dim(),
        )),
    ];

    if let Some(err) = &session.coord_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
    }

    let panel = Paragraph::new(lines).block(list_block("Coordinates", focused));
    frame.render_widget(panel, area);
}
