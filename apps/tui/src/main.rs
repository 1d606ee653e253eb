mod app;
mod cli;
mod config;
mod event;
mod fetch;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use orbit_core::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    config::load_environment(&args);

    let headless = args.headless || !is_terminal();
    let _log_guard = logging::init(headless);
    let config = config::init_app_config();

    let theme = if args.light { Theme::Light } else { Theme::Dark };
    let mut app = App::new(config, theme, args.cell_width)?;

    if headless {
        return event::run_headless(&mut app, args.feature, args.width, args.json).await;
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the app
    let result = event::run(&mut terminal, &mut app).await;
    app.quit();

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
