mod fetch;
mod render;
mod shell;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use orbit_core::{Palette, Theme};
use ratzilla::event::{MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use crate::fetch::{build_config, open_in_new_tab, spawn_fetch};
use crate::shell::{Command, Shell};

fn main() -> io::Result<()> {
    let shell = Rc::new(RefCell::new(Shell::new(build_config(), Theme::default())));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal
        .on_key_event({
            let shell = shell.clone();
            move |event| {
                // The borrow ends before any command runs
                let command = shell.borrow_mut().handle_key(event.code);
                run_command(&shell, command);
            }
        })?;

    terminal
        .on_mouse_event({
            let shell = shell.clone();
            move |event| {
                if event.kind != MouseEventKind::SingleClick(MouseButton::Left) {
                    return;
                }
                let command = shell.borrow_mut().click(event.col, event.row);
                run_command(&shell, command);
            }
        })?;

    let mut painted: Option<Theme> = None;
    terminal.draw_web(move |f| {
        let mut shell = shell.borrow_mut();
        if let Some(width) = viewport_width() {
            shell.menu.resize(width);
        }
        let count = shell.menu.options().len();
        if shell.menu.is_expanded() && !shell.animation.is_settled(count) {
            shell.animation.tick(js_sys::Date::now() / 1000.0);
        }

        let theme = shell.theme.theme();
        if painted != Some(theme) {
            paint_document(&shell.theme.palette());
            painted = Some(theme);
        }
        render::render_page(&mut shell, f);
    });

    Ok(())
}

fn run_command(shell: &Rc<RefCell<Shell>>, command: Option<Command>) {
    match command {
        Some(Command::Fetch(ticket)) => spawn_fetch(shell, ticket),
        Some(Command::Open(url)) => open_in_new_tab(&url),
        None => {}
    }
}

fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

/// Colors the page behind the grid so the theme covers the whole document.
fn paint_document(palette: &Palette) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let style = body.style();
    let _ = style.set_property("background-color", &render::css_color(palette.background));
    let _ = style.set_property("color", &render::css_color(palette.foreground));
}
