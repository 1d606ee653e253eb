use crate::app::App;
use crate::ui::palette::{base, color, line_style};
use orbit_core::menu::PanelView;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::Throbber;

pub fn render_panel(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let Some(option) = app.menu.active_option().copied() else {
        return;
    };
    let Some(view) = app.menu.panel() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", option.label))
        .title_style(
            Style::default()
                .fg(color(palette.accent))
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(hint_line(&view, option.link.is_some(), &palette))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.accent)))
        .style(base(&palette));
    let inner = block.inner(area);
    let lines: Vec<TextLine<'static>> = view
        .lines()
        .into_iter()
        .map(|line| TextLine::from(Span::styled(line.text, line_style(line.style, &palette))))
        .collect();
    let loading = matches!(view, PanelView::Loading);

    f.render_widget(block, area);

    if loading {
        let throbber = Throbber::default()
            .label("Fetching...")
            .style(Style::default().fg(color(palette.muted)))
            .throbber_style(Style::default().fg(color(palette.accent)));
        let row = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        f.render_stateful_widget(throbber, row[0], &mut app.throbber_state);
    } else {
        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
    }

    let last_tick = app.last_tick;
    let finished = app.panel_fx.as_mut().is_some_and(|effect| {
        f.buffer_mut().render_effect(effect, area, last_tick);
        effect.done()
    });
    if finished {
        app.panel_fx = None;
    }
}

fn hint_line(
    view: &PanelView<'_>,
    has_link: bool,
    palette: &orbit_core::Palette,
) -> TextLine<'static> {
    let key = Style::default()
        .fg(color(palette.focus))
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(color(palette.muted));

    let mut spans = vec![Span::styled(" x", key), Span::styled(": close ", label)];
    if matches!(view, PanelView::Loaded(_) | PanelView::Failed(_)) {
        spans.push(Span::styled("r", key));
        spans.push(Span::styled(": refresh ", label));
    }
    let links = view.links().len();
    if links > 0 {
        spans.push(Span::styled(format!("1-{links}"), key));
        spans.push(Span::styled(": open article ", label));
    }
    if has_link {
        spans.push(Span::styled("o", key));
        spans.push(Span::styled(": open ", label));
    }
    TextLine::from(spans)
}
