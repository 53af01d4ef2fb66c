use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::models::PrayerName;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, next: Option<PrayerName>, countdown: Option<&str>) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (Some(next), Some(countdown)) = (next, countdown) else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  No data", theme::dim())),
        ]);
        frame.render_widget(empty, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        next.display_name().to_uppercase(),
        theme::next().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // The big digits need 4 rows at quadrant size; fall back to plain text.
    if chunks[1].height >= 4 && chunks[1].width >= 32 {
        let big = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(theme::amber())
            .alignment(Alignment::Center)
            .lines(vec![countdown.to_string().into()])
            .build();
        frame.render_widget(big, chunks[1]);
    } else {
        let plain = Paragraph::new(Line::from(Span::styled(
            countdown,
            theme::amber().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(plain, chunks[1]);
    }
}
