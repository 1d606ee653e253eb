use crate::app::{handle_input, handle_mouse, App};
use crate::cli::FeatureArg;
use crate::ui;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use orbit_core::layout::node_positions;
use orbit_core::menu::PanelView;
use orbit_core::{FeatureContent, Selection};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

/// Run the application in headless mode (no UI)
pub async fn run_headless(
    app: &mut App,
    feature: Option<FeatureArg>,
    width_px: f64,
    json: bool,
) -> Result<()> {
    app.menu.resize(width_px);

    match feature {
        None => render_headless_layout(app, width_px, json),
        Some(feature) => render_headless_feature(app, feature, json).await,
    }
}

fn render_headless_layout(app: &App, width_px: f64, json: bool) -> Result<()> {
    let radius = app.menu.radius();
    let positions = node_positions(app.menu.options().len(), f64::from(radius));
    let options: Vec<HeadlessNode> = app
        .menu
        .options()
        .iter()
        .zip(positions)
        .map(|(option, point)| HeadlessNode {
            id: option.id.get(),
            label: option.label,
            x: point.x,
            y: point.y,
        })
        .collect();

    if json {
        let layout = HeadlessLayout {
            viewport_width: width_px,
            radius,
            options,
        };
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("\nOrbit menu");
    println!("==========");
    println!("Viewport: {width_px}px  Radius: {radius}px");
    println!("\nOptions:");
    for node in options {
        println!("- {} ({:.1}, {:.1})", node.label, node.x, node.y);
    }

    Ok(())
}

async fn render_headless_feature(app: &mut App, feature: FeatureArg, json: bool) -> Result<()> {
    let index = app
        .menu
        .options()
        .iter()
        .position(|option| option.label == feature.label())
        .ok_or_else(|| eyre!("unknown feature {}", feature.label()))?;

    if let Some(Selection::Fetch(ticket)) = app.menu.select(index) {
        app.spawn_fetch(ticket);
        if !app.next_outcome().await {
            return Err(eyre!("fetch task ended without a result"));
        }
    }

    let view = app
        .menu
        .panel()
        .ok_or_else(|| eyre!("{} has no panel content", feature.label()))?;

    if json {
        let report = match view {
            PanelView::Static(text) => HeadlessFeature::Loaded {
                label: feature.label(),
                content: FeatureContent::text(text),
            },
            PanelView::Loaded(content) => HeadlessFeature::Loaded {
                label: feature.label(),
                content: content.clone(),
            },
            PanelView::Failed(error) => HeadlessFeature::Failed {
                label: feature.label(),
                error: error.to_string(),
                message: error.placeholder(),
            },
            PanelView::Loading => return Err(eyre!("fetch did not settle")),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", feature.label());
    println!("{}", "=".repeat(feature.label().len()));
    for line in view.lines() {
        println!("{}", line.text);
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessLayout {
    viewport_width: f64,
    radius: u16,
    options: Vec<HeadlessNode>,
}

#[derive(serde::Serialize)]
struct HeadlessNode {
    id: u8,
    label: &'static str,
    x: f64,
    y: f64,
}

#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum HeadlessFeature {
    Loaded {
        label: &'static str,
        content: FeatureContent,
    },
    Failed {
        label: &'static str,
        error: String,
        message: String,
    },
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.resize(terminal.size()?.width);

    loop {
        // Update animations and collect finished fetches
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(width, _)) => app.resize(width),
                Ok(Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore other events
                }
            }
        }

        // Let spawned fetches make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}
