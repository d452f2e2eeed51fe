mod app;
mod domain;
mod error;
mod feedback;
mod input;
mod logging;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Clock, Countdown, History, SystemClock};
use feedback::TerminalFeedback;
use notifications::{LocalNotifier, NotificationContent};
use persistence::{
    ensure_taskly_dir, init_local_taskly, load_settings, log_file, save_settings, settings_file,
    FileStore, KeyValueStore, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::rc::Rc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "taskly")]
#[command(about = "A terminal shopping list and recurring countdown", long_about = None)]
struct Cli {
    /// Countdown interval in seconds (overrides settings.json for this run)
    #[arg(short, long, global = true)]
    interval: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .taskly directory in the current directory
    Init,
    /// Print the countdown completion history
    History,
    /// Print the current countdown status
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            logging::init_stderr_logging();
            let taskly_dir = init_local_taskly()?;
            save_settings(taskly_dir.join("settings.json"), &Settings::default())?;
            println!("Initialized taskly directory: {}", taskly_dir.display());
            println!();
            println!("Taskly will now use this local directory for its data.");
            println!("Run 'taskly' to open your list.");
            Ok(())
        }
        Some(Commands::History) => {
            logging::init_stderr_logging();
            let store = open_store()?;
            let history = History::load(store.as_ref());
            if history.is_empty() {
                println!("No History");
            }
            for entry in history.formatted_local() {
                println!("{}", entry);
            }
            Ok(())
        }
        Some(Commands::Status) => {
            logging::init_stderr_logging();
            let settings = resolve_settings(cli.interval)?;
            print_status(&settings)
        }
        None => {
            logging::init_logging(&log_file()?);
            let settings = resolve_settings(cli.interval)?;
            run_tui(&settings)
        }
    }
}

fn open_store() -> Result<Rc<dyn KeyValueStore>> {
    let dir = ensure_taskly_dir()?;
    Ok(Rc::new(FileStore::new(dir)))
}

/// settings.json with the command-line override applied
fn resolve_settings(interval: Option<u64>) -> Result<Settings> {
    let path = settings_file()?;
    let mut settings = load_settings(&path)
        .with_context(|| format!("Could not load settings from {}", path.display()))?;
    if let Some(secs) = interval {
        settings.countdown_interval_secs = secs;
    }
    Ok(settings)
}

fn print_status(settings: &Settings) -> Result<()> {
    let store = open_store()?;
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let countdown = Countdown::load(
        settings.interval_ms(),
        NotificationContent {
            title: settings.reminder_title.clone(),
            body: settings.reminder_body.clone(),
        },
        store,
        clock.clone(),
        Rc::new(LocalNotifier::new(clock, false)),
        Rc::new(TerminalFeedback::new()),
    );

    let status = countdown.status();
    let d = status.distance;
    println!(
        "{} {}d {}h {}m {}s",
        ui::counter_pane::headline(&status),
        d.days,
        d.hours,
        d.minutes,
        d.seconds
    );
    Ok(())
}

fn run_tui(settings: &Settings) -> Result<()> {
    let dir = ensure_taskly_dir()?;
    tracing::info!(dir = %dir.display(), "starting taskly");

    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::new(dir));
    let mut app = AppState::new(settings, store, Rc::new(SystemClock));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    tracing::info!("taskly stopped");

    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
