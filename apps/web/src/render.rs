use orbit_core::animation::trigger_scale;
use orbit_core::feature::LineStyle;
use orbit_core::menu::PanelView;
use orbit_core::{Palette, Rgb, SearchPanel};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Clear, List, ListItem, Paragraph, Wrap,
    },
    Frame,
};

use crate::shell::{Shell, CELL_HEIGHT_PX, CELL_WIDTH_PX};

const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn line_style(style: LineStyle, palette: &Palette) -> Style {
    match style {
        LineStyle::Heading => Style::default()
            .fg(color(palette.foreground))
            .add_modifier(Modifier::BOLD),
        LineStyle::Body => Style::default().fg(color(palette.foreground)),
        LineStyle::Muted => Style::default().fg(color(palette.muted)),
        LineStyle::Link => Style::default()
            .fg(color(palette.accent))
            .add_modifier(Modifier::UNDERLINED),
        LineStyle::Error => Style::default().fg(color(palette.error)),
    }
}

/// CSS form of a palette color, for the parts of the page outside the grid.
pub fn css_color(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
}

pub fn render_page(shell: &mut Shell, f: &mut Frame<'_>) {
    let palette = shell.theme.palette();
    let area = f.area();
    f.render_widget(
        Block::default().style(
            Style::default()
                .fg(color(palette.foreground))
                .bg(color(palette.background)),
        ),
        area,
    );

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area.inner(Margin::new(1, 1)));

    render_header(shell, &palette, f, main_layout[0]);

    let menu_area = if let Some(view) = shell.menu.panel() {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_layout[1]);
        render_panel(shell, &view, &palette, f, content[1]);
        content[0]
    } else {
        main_layout[1]
    };
    shell.menu_area = menu_area;
    render_radial(shell, &palette, f, menu_area);

    f.render_widget(
        Paragraph::new(Span::styled(
            shell.status.as_str(),
            Style::default().fg(color(palette.muted)),
        )),
        main_layout[2],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Enter/Space: open | Arrows: move | Esc: close | t: theme",
            Style::default().fg(color(palette.muted)),
        ))
        .alignment(Alignment::Center),
        main_layout[3],
    );

    if let Some(search) = shell.search.as_ref() {
        render_search(search, &palette, f, area);
    }
}

fn render_header(shell: &Shell, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let toggle = if shell.theme.is_light() { "○━●" } else { "●━○" };
    let line = TextLine::from(vec![
        Span::styled(
            "Orbit ",
            Style::default()
                .fg(color(palette.accent))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", shell.theme.theme().label()),
            Style::default().fg(color(palette.foreground)),
        ),
        Span::styled(toggle, Style::default().fg(color(palette.focus))),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.muted)));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_radial(shell: &Shell, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let width_px = f64::from(area.width) * CELL_WIDTH_PX;
    let height_px = f64::from(area.height) * CELL_HEIGHT_PX;
    let layout = shell.radial_layout();
    let expanded = shell.menu.is_expanded();
    let focused = shell.menu.focused_index();

    f.render_widget(
        Canvas::default()
            .background_color(color(palette.background))
            .paint(|ctx| {
                let (cx, cy) = (layout.center.x, height_px - layout.center.y);

                if expanded {
                    for (index, option) in shell.menu.options().iter().enumerate() {
                        let frame = shell.animation.node_frame(index);
                        if !frame.is_visible() {
                            continue;
                        }
                        let target = layout.node_center(index);
                        let x = (target.x - cx).mul_add(frame.opacity, cx);
                        let y = ((height_px - target.y) - cy).mul_add(frame.opacity, cy);
                        let node_color = if index == focused {
                            color(palette.focus)
                        } else {
                            color(palette.accent)
                        };

                        ctx.draw(&CanvasLine {
                            x1: cx,
                            y1: cy,
                            x2: x,
                            y2: y,
                            color: color(palette.muted),
                        });
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: layout.node_radius * frame.scale,
                            color: node_color,
                        });
                        #[allow(clippy::cast_precision_loss)]
                        let half_label = option.label.chars().count() as f64 * CELL_WIDTH_PX / 2.0;
                        ctx.print(
                            x - half_label,
                            y,
                            Span::styled(option.label, Style::default().fg(node_color)),
                        );
                    }
                    ctx.layer();
                }

                let trigger_color = if expanded {
                    color(palette.accent)
                } else {
                    color(palette.focus)
                };
                ctx.draw(&Circle {
                    x: cx,
                    y: cy,
                    radius: layout.trigger_radius * trigger_scale(expanded),
                    color: trigger_color,
                });
                ctx.print(
                    CELL_WIDTH_PX.mul_add(-1.5, cx),
                    cy,
                    Span::styled(
                        "ALL",
                        Style::default()
                            .fg(trigger_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            })
            .x_bounds([0.0, width_px])
            .y_bounds([0.0, height_px]),
        area,
    );
}

fn render_panel(
    shell: &Shell,
    view: &PanelView<'_>,
    palette: &Palette,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let title = shell
        .menu
        .active_option()
        .map_or("", |option| option.label);
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(color(palette.accent))
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(
            " x: close  r: refresh  o/1-9: open link ",
            Style::default().fg(color(palette.muted)),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.accent)));

    let lines: Vec<TextLine<'_>> = view
        .lines()
        .into_iter()
        .map(|line| TextLine::from(Span::styled(line.text, line_style(line.style, palette))))
        .collect();

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_search(search: &SearchPanel, palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let width = area.width.min(50);
    let height = area.height.min(14);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.accent)))
        .style(
            Style::default()
                .fg(color(palette.foreground))
                .bg(color(palette.background)),
        );
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled("> ", Style::default().fg(color(palette.focus))),
            Span::raw(search.query()),
        ])),
        chunks[0],
    );

    if let Some(message) = search.empty_message() {
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(color(palette.muted)))),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem<'_>> = search
        .results()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let style = if index == search.active_index() {
                Style::default()
                    .fg(color(palette.background))
                    .bg(color(palette.focus))
            } else {
                Style::default().fg(color(palette.foreground))
            };
            ListItem::new(Span::styled(*label, style))
        })
        .collect();
    f.render_widget(List::new(items), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::css_color;
    use orbit_core::Theme;

    #[test]
    fn page_background_follows_the_theme() {
        assert_eq!(css_color(Theme::Dark.palette().background), "#121218");
        assert_eq!(css_color(Theme::Light.palette().background), "#f5f5f0");
    }
}
