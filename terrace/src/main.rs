//! Terrace stack browser.
//!
//! A terminal interface for browsing the fact stacks of a Terrace corpus.
//!
//! # Headless Mode
//!
//! Run with `--headless` to print stacks instead of drawing the TUI:
//!
//! ```bash
//! cargo run -p terrace -- --headless facts.json --context knowledge --expand
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;
use terrace_core::{FactSnapshot, StackConfig};
use tracing_subscriber::EnvFilter;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let cli = match headless::parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if cli.help {
        print_help();
        return Ok(());
    }

    let config = match StackConfig::from_env() {
        Ok(config) => cli.apply(config),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if cli.headless {
        init_logging();
        return headless::run_headless(cli, config)
            .await
            .map_err(|e| e.into());
    }

    let snapshot = match headless::load_snapshot(&cli).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to load snapshot: {e}");
            std::process::exit(1);
        }
    };
    let source = if cli.demo { None } else { cli.path.clone() };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(snapshot, source, config)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG`. Only used outside the TUI.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("terrace=info,terrace_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Main application loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Process any pending reload
        if app.pending_reload {
            app.pending_reload = false;
            if let Some(path) = app.source.clone() {
                match FactSnapshot::load_json(&path).await {
                    Ok(snapshot) => app.replace_snapshot(snapshot),
                    Err(e) => app.set_status(format!("Reload failed: {e}")),
                }
            }
            continue;
        }

        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }
    }
}

fn print_help() {
    println!("Terrace - browse fact stacks of a corpus");
    println!();
    println!("USAGE:");
    println!("  terrace [OPTIONS] <SNAPSHOT.json>");
    println!("  terrace [OPTIONS] --demo");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help           Show this help message");
    println!("  --demo               Use the built-in sample corpus");
    println!("  --headless           Print stacks instead of drawing the TUI");
    println!("  --context <CTX>      Only show one context: global, builder, knowledge");
    println!("  --source <SRC>       Relation source: linked, support-pair, combined");
    println!();
    println!("HEADLESS OPTIONS (only with --headless):");
    println!("  --json               Print JSON instead of text");
    println!("  --expand             List every member of every stack");
    println!();
    println!("ENVIRONMENT:");
    println!("  TERRACE_RELATION_SOURCE   Default relation source");
    println!("  TERRACE_CONTEXT           Default context");
    println!("  RUST_LOG                  Log filter for headless mode");
    println!();
    println!("EXAMPLES:");
    println!("  terrace facts.json                       # Interactive TUI");
    println!("  terrace --headless --demo --expand       # Print the sample corpus");
    println!("  terrace --headless facts.json --json --source linked");
}
