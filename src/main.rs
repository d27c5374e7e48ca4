mod app;
mod config;
mod display;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use display::DisplayNotesRequest;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "bigscreen-notes")]
#[command(version)]
#[command(about = "Bigscreen view with a notes and special conditions panel")]
struct Args {
    /// Notes text
    #[arg(short, long)]
    notes: Option<String>,

    /// Special conditions text
    #[arg(short, long)]
    special_conditions: Option<String>,

    /// Load the request from a .json or .toml file (re-read periodically)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Header title (defaults to the configured title)
    #[arg(short, long)]
    title: Option<String>,

    /// Render the panel once to stdout as plain text
    #[arg(long)]
    print: bool,

    /// Width in columns for --print
    #[arg(long, default_value_t = 100)]
    width: u16,

    /// Print the resolved request as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn overrides(&self) -> DisplayNotesRequest {
        DisplayNotesRequest::new(self.notes.clone(), self.special_conditions.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so --json/--print output stays clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    // Non-interactive commands
    if args.json || args.print {
        let request = resolve_request(&args).await?;
        if args.json {
            println!("{}", serde_json::to_string(&request)?);
        }
        if args.print {
            print_panel(&request, &config, args.width);
        }
        return Ok(());
    }

    run_tui(args, config).await
}

async fn resolve_request(args: &Args) -> Result<DisplayNotesRequest> {
    let base = match args.file {
        Some(ref path) => DisplayNotesRequest::load(path).await?,
        None => DisplayNotesRequest::default(),
    };
    Ok(base.overlay(args.overrides()))
}

fn print_panel(request: &DisplayNotesRequest, config: &AppConfig, width: u16) {
    let theme = Theme::from_config(&config.theme);
    for line in ui::render_snapshot(request, &theme, config.layout.wide_breakpoint, width) {
        println!("{}", line);
    }
}

async fn run_tui(args: Args, config: AppConfig) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let overrides = args.overrides();
    let mut app = App::new(config, args.file, overrides, args.title).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Starting bigscreen");
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            if let Err(e) = app.handle_key(key).await {
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick().await;
    }
}
