mod app;
mod chart;
mod clipboard;
mod config;
mod dispatch;
mod error;
mod fileio;
mod input;
mod mode;
mod status;
mod style;
mod table;
mod ui;
mod util;

use std::fs::File;
use std::io::{self, Write};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{error, info, Level};
use tracing_subscriber::fmt::writer::MakeWriter;

use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use clipboard::SystemClipboard;
use config::AppConfig;
use status::StatusMessage;
use style::Theme;

/// Environment variable naming a file to receive debug logs
const LOG_ENV: &str = "SHEETVIEW_LOG";

#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    theme: Option<String>,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--theme" => {
                if i + 1 < args.len() {
                    parsed.theme = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --theme requires an argument");
                    std::process::exit(1);
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--list-themes" => {
                for name in Theme::builtin_names() {
                    println!("{}", name);
                }
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
            _ => {
                parsed.file = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    parsed
}

fn print_help() {
    println!("sheetview - A terminal viewer for spreadsheets and CSV files");
    println!();
    println!("USAGE:");
    println!("    sheetview [OPTIONS] <FILE>");
    println!();
    println!("OPTIONS:");
    println!("    -t, --theme <NAME|FILE>  Color theme name or path to a theme TOML file");
    println!("    --list-themes            List built-in themes");
    println!("    -h, --help               Print this help message");
    println!();
    println!("THEMES:");
    println!("    {}", Theme::builtin_names().join(", "));
    println!();
    println!("Supported formats: .csv, .tsv, .xlsx, .xlsm, .xls, .xlsb, .ods");
    println!("Set {}=<path> to write debug logs to a file.", LOG_ENV);
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occurred"
            );
        } else {
            error!("panic occurred");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

/// A `MakeWriter` for `tracing` that logs to the **main screen** by leaving the alternate screen temporarily.
pub struct MainScreenWriter;

impl<'a> MakeWriter<'a> for MainScreenWriter {
    type Writer = MainScreenWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        MainScreenWriterHandle
    }
}

/// A handle that writes to stdout outside the alternate screen
pub struct MainScreenWriterHandle;

impl Write for MainScreenWriterHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        execute!(io::stdout(), LeaveAlternateScreen)?;
        println!();
        execute!(io::stdout(), MoveToColumn(0))?;
        let result = io::stdout().write(buf);
        execute!(io::stdout(), MoveToColumn(0))?;
        io::stdout().flush()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Debug logs go to `$SHEETVIEW_LOG` when set, otherwise warnings go to the main screen
fn init_logging() {
    let log_file = std::env::var_os(LOG_ENV).and_then(|path| File::create(path).ok());
    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(Level::DEBUG)
            .init(),
        None => tracing_subscriber::fmt()
            .with_writer(MainScreenWriter)
            .with_max_level(Level::WARN)
            .init(),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> io::Result<()> {
    init_logging();
    install_panic_hook();

    let args = parse_args();
    let Some(path) = args.file else {
        print_help();
        std::process::exit(1);
    };

    if let Err(e) = fileio::validate_path(&path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let workbook = match fileio::load_file(&path) {
        Ok(workbook) => workbook,
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to load file");
            eprintln!("Error loading file: {}", e);
            std::process::exit(1);
        }
    };
    info!(path = %path.display(), sheets = workbook.sheet_count(), "sheetview started");

    let (config, warnings) = AppConfig::load(args.theme.as_deref());

    let mut app = App::new(
        workbook,
        display_name(&path),
        config,
        Box::new(SystemClipboard::new()),
    );
    if !warnings.is_empty() {
        app.status = StatusMessage::warning(warnings.join("; "));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
