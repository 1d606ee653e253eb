use crate::ui::palette::{base, color};
use crate::ui::widgets::popup::overlay_rect;
use orbit_core::{Palette, SearchPanel};
use ratatui::layout::{Constraint, Direction, Layout, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render_search(panel: &SearchPanel, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let popup_area = overlay_rect(60, 60, Size::new(36, 10), area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Search ")
        .title_style(
            Style::default()
                .fg(color(palette.accent))
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(TextLine::from(vec![
            Span::styled(" ↑/↓", Style::default().fg(color(palette.focus))),
            Span::styled(": choose ", Style::default().fg(color(palette.muted))),
            Span::styled("Enter", Style::default().fg(color(palette.focus))),
            Span::styled(": open ", Style::default().fg(color(palette.muted))),
            Span::styled("Esc", Style::default().fg(color(palette.focus))),
            Span::styled(": close ", Style::default().fg(color(palette.muted))),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.accent)))
        .style(base(palette));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let input = if panel.query().is_empty() {
        TextLine::from(vec![
            Span::styled("> ", Style::default().fg(color(palette.accent))),
            Span::styled("Search here...", Style::default().fg(color(palette.muted))),
        ])
    } else {
        TextLine::from(vec![
            Span::styled("> ", Style::default().fg(color(palette.accent))),
            Span::styled(
                panel.query().to_string(),
                Style::default().fg(color(palette.foreground)),
            ),
            Span::styled("▌", Style::default().fg(color(palette.focus))),
        ])
    };
    f.render_widget(Paragraph::new(input), sections[0]);

    let lines: Vec<TextLine<'static>> = if let Some(message) = panel.empty_message() {
        vec![TextLine::from(Span::styled(
            message,
            Style::default().fg(color(palette.muted)),
        ))]
    } else {
        let visible = usize::from(sections[1].height.max(1));
        let offset = panel.active_index().saturating_sub(visible - 1);
        panel
            .results()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(index, label)| {
                if index == panel.active_index() {
                    TextLine::from(Span::styled(
                        format!("▶ {label}"),
                        Style::default()
                            .fg(color(palette.background))
                            .bg(color(palette.accent))
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    TextLine::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(color(palette.foreground)),
                    ))
                }
            })
            .collect()
    };
    f.render_widget(Paragraph::new(Text::from(lines)), sections[1]);
}
