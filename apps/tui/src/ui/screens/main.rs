use crate::app::App;
use crate::ui::palette::{base, color};
use crate::ui::widgets::panel::render_panel;
use crate::ui::widgets::radial::render_radial;
use crate::ui::widgets::search::render_search;
use orbit_core::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_main(app: &mut App, f: &mut Frame<'_>) {
    let palette = app.theme.palette();
    f.render_widget(Block::default().style(base(&palette)), f.area());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and theme toggle
            Constraint::Min(8),    // Menu and feature panel
            Constraint::Length(1), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(app, f, main_layout[0]);
    render_content_section(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(&palette, f, main_layout[3]);

    let area = f.area();
    if let Some(search) = app.search.as_ref() {
        render_search(search, &palette, f, area);
    }
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.muted)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Orbit ",
            Style::default()
                .fg(color(palette.accent))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "button of all",
            Style::default().fg(color(palette.foreground)),
        ),
    ]));
    f.render_widget(title, chunks[0]);

    let toggle = if app.theme.is_light() { "○━●" } else { "●━○" };
    let theme = Paragraph::new(TextLine::from(vec![
        Span::styled(
            app.theme.theme().label(),
            Style::default().fg(color(palette.foreground)),
        ),
        Span::raw(" "),
        Span::styled(toggle, Style::default().fg(color(palette.focus))),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(theme, chunks[1]);
}

fn render_content_section(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let show_panel = app.menu.panel().is_some();

    let (menu_area, panel_area) = if show_panel {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    app.menu_area = menu_area;
    render_radial(app, f, menu_area);

    if let Some(panel_area) = panel_area {
        render_panel(app, f, panel_area);
    }
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let palette = app.theme.palette();
    let paragraph = Paragraph::new(Text::from(TextLine::from(Span::styled(
        app.status_message.clone(),
        Style::default().fg(color(palette.muted)),
    ))));
    f.render_widget(paragraph, area);
}

fn render_shortcuts(palette: &Palette, f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(color(palette.focus))
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(color(palette.muted));

    let line = TextLine::from(vec![
        Span::styled("Enter/Space", key),
        Span::styled(": open | ", label),
        Span::styled("Arrows", key),
        Span::styled(": move | ", label),
        Span::styled("Esc", key),
        Span::styled(": close | ", label),
        Span::styled("t", key),
        Span::styled(": theme | ", label),
        Span::styled("q", key),
        Span::styled(": quit", label),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use orbit_core::{Config, Theme};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_theme_label_and_records_menu_area() {
        let Ok(mut app) = App::new(Config::default(), Theme::Dark, 8) else {
            panic!("app should build");
        };
        let Ok(mut terminal) = Terminal::new(TestBackend::new(100, 40)) else {
            panic!("test terminal");
        };

        let drawn = terminal.draw(|f| crate::ui::ui(&mut app, f));
        assert!(drawn.is_ok());
        assert!(buffer_text(&terminal).contains("dark mode"));
        assert!(app.menu_area.width > 0);
    }

    #[test]
    fn search_overlay_shows_no_results_message() {
        let Ok(mut app) = App::new(Config::default(), Theme::Light, 8) else {
            panic!("app should build");
        };
        let mut panel = orbit_core::SearchPanel::new();
        panel.set_query("zzz");
        app.search = Some(panel);
        let Ok(mut terminal) = Terminal::new(TestBackend::new(100, 40)) else {
            panic!("test terminal");
        };

        let drawn = terminal.draw(|f| crate::ui::ui(&mut app, f));
        assert!(drawn.is_ok());
        let text = buffer_text(&terminal);
        assert!(text.contains("No results found for \"zzz\""));
        assert!(text.contains("light mode"));
    }
}
