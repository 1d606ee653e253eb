use crate::app::App;
use crate::ui::palette::color;
use orbit_core::animation::trigger_scale;
use orbit_core::layout::Point;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::Frame;

const TRIGGER_LABEL: &str = "ALL";

/// Draws the trigger and, while expanded, the options around it.
///
/// The canvas works in pixel units (one cell is `cell_width_px` wide and
/// twice as tall) so the option circle stays round on screen.
pub fn render_radial(app: &App, f: &mut Frame<'_>, area: Rect) {
    if area.width < 8 || area.height < 4 {
        return;
    }

    let palette = app.theme.palette();
    let layout = app.radial_layout();
    let cell_width = f64::from(app.cell_width_px);
    let width_px = f64::from(area.width) * cell_width;
    let height_px = f64::from(area.height) * f64::from(app.cell_height_px());
    let expanded = app.menu.is_expanded();
    let focused = app.menu.focused_index();

    // Screen space grows downwards, canvas space upwards
    let to_canvas = |point: Point| (point.x, height_px - point.y);

    f.render_widget(
        Canvas::default()
            .background_color(color(palette.background))
            .paint(|ctx| {
                let (cx, cy) = to_canvas(layout.center);

                if expanded {
                    for (index, option) in app.menu.options().iter().enumerate() {
                        let frame = app.animation.node_frame(index);
                        if !frame.is_visible() {
                            continue;
                        }

                        let target = layout.node_center(index);
                        let (tx, ty) = to_canvas(target);
                        let x = (tx - cx).mul_add(frame.opacity, cx);
                        let y = (ty - cy).mul_add(frame.opacity, cy);

                        let node_color = if index == focused {
                            color(palette.focus)
                        } else if frame.opacity < 0.5 {
                            color(palette.muted)
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
                        let half_label = option.label.chars().count() as f64 * cell_width / 2.0;
                        let mut style = Style::default().fg(node_color);
                        if index == focused {
                            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                        }
                        ctx.print(x - half_label, y, Span::styled(option.label, style));
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
                    cell_width.mul_add(-1.5, cx),
                    cy,
                    Span::styled(
                        TRIGGER_LABEL,
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
