use ratatui::layout::{Constraint, Flex, Layout, Rect, Size};

/// Centres an overlay that takes a share of `area` but never drops below
/// `min` (unless `area` itself is smaller).
pub fn overlay_rect(percent_x: u16, percent_y: u16, min: Size, area: Rect) -> Rect {
    let width = share(area.width, percent_x).max(min.width).min(area.width);
    let height = share(area.height, percent_y).max(min.height).min(area.height);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

fn share(length: u16, percent: u16) -> u16 {
    u16::try_from(u32::from(length) * u32::from(percent) / 100).unwrap_or(length)
}
