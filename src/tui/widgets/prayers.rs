use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::session::PrayerRow;
use crate::tui::theme;
use crate::utils::format::fit_width;

pub fn render(frame: &mut Frame, area: Rect, rows: &[PrayerRow]) {
    let block = Block::default()
        .title(Span::styled(" Today ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let (marker, name_style) = if row.is_next {
                ("▶", theme::next())
            } else if row.is_current {
                ("●", theme::current())
            } else if row.name.is_informational() {
                (" ", theme::dim())
            } else {
                (" ", theme::bold())
            };

            let mut spans = vec![
                Span::styled(format!("  {} ", marker), name_style),
                Span::styled(fit_width(row.name.display_name(), 10), name_style),
                Span::styled(row.time.clone(), if row.is_next { theme::next() } else { theme::dim() }),
            ];

            if row.is_next {
                spans.push(Span::styled("  NEXT", theme::next()));
                if let Some(countdown) = &row.countdown {
                    spans.push(Span::styled(format!("  in {}", countdown), theme::amber()));
                }
            } else if row.is_current {
                spans.push(Span::styled("  now", theme::current()));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
