mod app;
mod clock;
mod dialogs;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod scheduler;
mod store;
mod ticker;
mod ui;

use anyhow::{anyhow, Result};
use app::App;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dialogs::ConsoleDialogs;
use notifications::DesktopNotifier;
use persistence::{
    config_file, ensure_data_dir, get_data_dir, init_local_dir, load_config, logs_dir,
    records_file, save_config, ReminderConfig,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use store::RecordStore;
use ticker::PollTimer;
use tracing::{error, info};
use ui::TerminalHost;

#[derive(Parser)]
#[command(name = "minoxtrack")]
#[command(about = "Track minoxidil applications and get reminded 24 hours later", long_about = None)]
struct Cli {
    /// Data directory. Defaults to a local .minoxtrack or the platform data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .minoxtrack directory in the current directory
    Init,
    /// Record an application without opening the TUI
    Record {
        /// Time of the application (MM/dd/yyyy HH:mm). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
    /// Print the summary labels
    Status,
    /// Print every record, newest first
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let dir = init_local_dir(&std::env::current_dir()?)?;
            save_config(config_file(&dir), &ReminderConfig::default())?;
            println!("Initialized data directory: {}", dir.display());
            println!();
            println!("Edit {} to change reminder timing.", config_file(&dir).display());
            Ok(())
        }
        Some(Commands::Record { at }) => {
            let mut app = open_app(cli.data_dir.as_deref(), cli.verbose)?;
            let mut dialogs = ConsoleDialogs::stdio();
            app.startup(&mut dialogs)?;

            match at {
                Some(text) => {
                    let timestamp = domain::parse_edit_input(&text).ok_or_else(|| {
                        anyhow!("Invalid time {:?}. Use MM/dd/yyyy HH:mm", text)
                    })?;
                    app.record_at(&mut dialogs, timestamp)?;
                }
                None => app.record(&mut dialogs)?,
            }
            Ok(())
        }
        Some(Commands::Status) => {
            let mut app = open_app(cli.data_dir.as_deref(), cli.verbose)?;
            app.startup(&mut ConsoleDialogs::stdio())?;

            let summary = &app.view.summary;
            println!("{}", summary.total_label());
            println!("{}", summary.today_label());
            println!("{}", summary.last_application_label());
            println!("{}", summary.next_reminder_label());
            Ok(())
        }
        Some(Commands::List) => {
            let mut app = open_app(cli.data_dir.as_deref(), cli.verbose)?;
            app.startup(&mut ConsoleDialogs::stdio())?;

            for (idx, row) in app.view.rows.iter().enumerate() {
                println!("{:>4}. {}", idx + 1, row.text);
            }
            Ok(())
        }
        None => run_tui(cli.data_dir.as_deref(), cli.verbose),
    }
}

/// Resolve the data directory, start logging, and build the app around the stored records
fn open_app(data_dir: Option<&Path>, verbose: bool) -> Result<App<DesktopNotifier>> {
    let dir = ensure_data_dir(&get_data_dir(data_dir)?)?;
    logging::enable_logging(&logs_dir(&dir), verbose)?;
    info!(dir = %dir.display(), "using data directory");

    let config = load_config(config_file(&dir))?;
    let store = RecordStore::new(records_file(&dir));
    Ok(App::new(store, config, DesktopNotifier::new(), SystemClock))
}

fn run_tui(data_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let mut app = open_app(data_dir, verbose)?;
    let poll_interval = app.scheduler().config().poll_interval();
    eprintln!("Using data file: {}", app.store().path().display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut host = TerminalHost::new(Terminal::new(CrosstermBackend::new(stdout))?);

    // Run app
    let result = run_app(&mut host, &mut app, poll_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(host.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    host.terminal_mut().show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "terminal session ended with an error");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    host: &mut TerminalHost<CrosstermBackend<Stdout>>,
    app: &mut App<DesktopNotifier>,
    poll_interval: Duration,
) -> Result<()> {
    app.startup(host)?;
    app.request_notification_permission();

    let tick_rate = ticker::tick_duration();
    let mut poll_timer = PollTimer::new(poll_interval, Instant::now());

    loop {
        host.draw(&app.view, app.selected_index)?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, host, key)? {
                    return Ok(());
                }
            }
        }

        app.deliver_due_notifications();

        if poll_timer.is_due(Instant::now()) {
            app.poll_reminder(host)?;
        }

        // Keeps "Overdue" and today's count current as time passes
        app.refresh();
    }
}
