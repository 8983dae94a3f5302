//! Splitmark - A split-pane terminal markdown editor.
//!
//! # Usage
//!
//! ```bash
//! splitmark
//! splitmark notes.md --theme dracula --mode light
//! splitmark --html README.md > README.html
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use splitmark::app::{App, STARTER_MARKDOWN};
use splitmark::config::{ColorMode, EditorTheme, PreferenceStore, Preferences, preferences_path};
use splitmark::document::render_html;

/// A split-pane terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "splitmark", version, about, long_about = None)]
struct Cli {
    /// Markdown file to start from (never written back)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Editor colour theme for this session
    #[arg(long, value_enum)]
    theme: Option<EditorTheme>,

    /// Light, dark, or follow the terminal, for this session
    #[arg(long, value_enum)]
    mode: Option<ColorMode>,

    /// Print the HTML for FILE (or stdin) and exit
    #[arg(long)]
    html: bool,

    /// Write log output to a file
    #[arg(long, value_name = "PATH", env = "SPLITMARK_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Preference file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    preferences: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // Log lines on stderr would tear the full-screen UI
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), !cli.html)?;

    if cli.html {
        let text = read_source(cli.file.as_deref())?;
        print!("{}", render_html(&text));
        return Ok(());
    }

    let text = match cli.file.as_deref() {
        Some(path) => read_source(Some(path))?,
        None => STARTER_MARKDOWN.to_string(),
    };
    let file_label = cli
        .file
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());

    let store = cli
        .preferences
        .or_else(preferences_path)
        .map_or_else(PreferenceStore::in_memory, |path| {
            PreferenceStore::open(&path)
        });
    let preferences = Preferences::from_store(&store).with_overrides(cli.theme, cli.mode);
    tracing::info!(
        theme = preferences.editor_theme.id(),
        mode = preferences.color_mode.id(),
        path = ?store.path(),
        "preferences resolved"
    );

    let mut app = App::new(text)
        .with_file_label(file_label)
        .with_preferences(preferences)
        .with_store(store);

    app.run().context("Application error")
}
