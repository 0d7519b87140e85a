use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use mdnotes::config::{Config, SavePolicy, DEFAULT_EXPORT_DIR, DEFAULT_STORAGE_DIR};
use mdnotes::export::{self, ExportFormat};
use mdnotes::store::NoteStore;
use mdnotes::workspace::{filter_names, Workspace};
use mdnotes::{app, logging};

#[derive(Parser)]
#[command(name = "mdnotes", version, about = "A terminal markdown note editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the notes (created if missing)
    #[arg(long, env = "MDNOTES_STORAGE", default_value = DEFAULT_STORAGE_DIR, global = true)]
    storage: PathBuf,

    /// Directory that exported HTML files are written to
    #[arg(long, default_value = DEFAULT_EXPORT_DIR)]
    export_dir: PathBuf,

    /// Save after every change instead of only on Ctrl+S
    #[arg(long)]
    autosave: bool,

    /// Append debug logs to this file
    #[arg(long, env = "MDNOTES_LOG", global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the notes in the storage directory
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Export a note as a standalone HTML file
    Export {
        /// Note file name, e.g. ideas.md
        name: String,
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_EXPORT_DIR)]
        output: PathBuf,
        /// Export the highlighted markdown source instead of the rendered page
        #[arg(long)]
        source: bool,
    },
}

fn main() -> io::Result<()> {
    mdnotes::markdown::code_highlight::ensure_loaded();

    let cli = Cli::parse();

    if let Some(path) = cli.log.as_deref() {
        if let Err(e) = logging::init(path) {
            eprintln!("Error: cannot open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    // Handle subcommands first
    match cli.command {
        Some(Commands::List { search }) => return handle_list(cli.storage, search.as_deref()),
        Some(Commands::Export {
            name,
            output,
            source,
        }) => return handle_export(cli.storage, &name, output, source),
        None => {}
    }

    let config = Config {
        storage_dir: cli.storage,
        export_dir: cli.export_dir,
        save_policy: if cli.autosave {
            SavePolicy::OnChange
        } else {
            SavePolicy::Manual
        },
        ..Config::default()
    };
    let workspace = match Workspace::open(config) {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    run_editor(workspace)
}

/// Handles `mdnotes list`: prints one note name per line.
fn handle_list(storage: PathBuf, search: Option<&str>) -> io::Result<()> {
    let names = match NoteStore::open(storage).and_then(|store| store.list()) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    for name in filter_names(&names, search.unwrap_or("")) {
        println!("{}", name);
    }
    Ok(())
}

/// Handles `mdnotes export NAME`: writes the HTML file and exits.
fn handle_export(storage: PathBuf, name: &str, output: PathBuf, source: bool) -> io::Result<()> {
    let format = if source {
        ExportFormat::Source
    } else {
        ExportFormat::Html
    };
    let result = NoteStore::open(storage)
        .map_err(export::ExportError::from)
        .and_then(|store| export::export_note(&store, name, &output, format));
    match result {
        Ok(path) => {
            println!("Exported to {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Sets up the terminal, runs the TUI editor, and restores the terminal on exit.
fn run_editor(workspace: Workspace) -> io::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, workspace);

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workspace: Workspace,
) -> io::Result<()> {
    let mut app = app::App::new(workspace);

    loop {
        app.render_frame(terminal)?;

        // Block up to 100ms waiting for the first event (prevents busy-loop,
        // gives tick() a chance to run ~10x/sec for alert expiry).
        if event::poll(Duration::from_millis(100))? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("editor closed");
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    Ok(())
}
