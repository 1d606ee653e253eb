use orbit_core::feature::LineStyle;
use orbit_core::{Palette, Rgb};
use ratatui::style::{Color, Modifier, Style};

pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn base(palette: &Palette) -> Style {
    Style::default()
        .fg(color(palette.foreground))
        .bg(color(palette.background))
}

pub fn line_style(style: LineStyle, palette: &Palette) -> Style {
    match style {
        LineStyle::Heading => Style::default()
            .fg(color(palette.foreground))
            .add_modifier(Modifier::BOLD),
        LineStyle::Body => Style::default().fg(color(palette.foreground)),
        LineStyle::Muted => Style::default().fg(color(palette.muted)),
        LineStyle::Link => Style::default()
            .fg(color(palette.accent))
            .add_modifier(Modifier::UNDERLINED),
        LineStyle::Error => Style::default()
            .fg(color(palette.error))
            .add_modifier(Modifier::BOLD),
    }
}
