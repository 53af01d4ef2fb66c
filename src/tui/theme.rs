use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(12, 20, 18);
pub const SURFACE: Color = Color::Rgb(20, 32, 29);
pub const BORDER: Color = Color::Rgb(44, 66, 60);
pub const TEXT: Color = Color::Rgb(222, 232, 228);
pub const TEXT_DIM: Color = Color::Rgb(120, 142, 136);
pub const EMERALD: Color = Color::Rgb(21, 140, 110);
pub const MINT: Color = Color::Rgb(112, 204, 170);
pub const SKY: Color = Color::Rgb(96, 150, 220);
pub const AMBER: Color = Color::Rgb(210, 160, 70);
pub const RED: Color = Color::Rgb(200, 88, 72);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn accent() -> Style {
    Style::default().fg(EMERALD)
}

/// Next prayer highlight.
pub fn next() -> Style {
    Style::default().fg(MINT).add_modifier(Modifier::BOLD)
}

/// Current prayer highlight.
pub fn current() -> Style {
    Style::default().fg(SKY)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        Style::default().fg(BORDER)
    }
}
