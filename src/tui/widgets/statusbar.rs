use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::session::Phase;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, phase: Phase) {
    let hints: &[(&str, &str)] = match phase {
        Phase::Loaded => &[
            ("[c]", " change location  "),
            ("[r]", " refresh  "),
            ("[n]", " notifications  "),
            ("[q]", " quit"),
        ],
        Phase::Manual => &[
            ("[Tab]", " next panel  "),
            ("[↑ ↓]", " move  "),
            ("[Enter]", " select  "),
            ("[l]", " detect  "),
            ("[Esc]", " quit"),
        ],
        Phase::Error => &[("[Enter]", " select manually  "), ("[q]", " quit")],
        Phase::Detecting | Phase::Loading => &[("[q]", " quit")],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme::accent()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
