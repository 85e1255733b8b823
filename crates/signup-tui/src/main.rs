mod actions;
mod app;
mod submissions;
mod ui;
mod util;

use std::fs::{self, File};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signup_config::{self as config, SubmitOutput};
use signup_core::UserCreationInput;
use tracing::debug;

use crate::actions::execute_action;
use crate::app::App;
use crate::submissions::Submissions;

#[derive(Debug, Parser)]
#[command(name = "signup-tui", version, about = "signup form TUI")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs to this file; the terminal itself is never logged to.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let app_config = config::load(args.config).with_context(|| "load config")?;
    debug!(?app_config, "config loaded");

    let mut app = App::new(
        app_config.form.initial_order_rows,
        app_config.form.mask_password,
    );
    let mut submissions = Submissions::default();

    {
        let mut terminal = TerminalGuard::new()?;
        run_app(&mut terminal, &mut app, &mut submissions)?;
    }

    report_submissions(submissions.into_items(), app_config.submit.output)
}

fn run_app(
    terminal: &mut TerminalGuard,
    app: &mut App,
    submissions: &mut Submissions,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            execute_action(app, submissions, action);
        }

        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn report_submissions(items: Vec<UserCreationInput>, output: SubmitOutput) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for input in &items {
        match output {
            SubmitOutput::Json => {
                serde_json::to_writer(&mut stdout, input)?;
                writeln!(stdout)?;
            }
            SubmitOutput::Log => {
                writeln!(
                    stdout,
                    "submitted {} <{}> with {} order(s)",
                    input.name,
                    input.email,
                    input.orders.len()
                )?;
            }
        }
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create log directory {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
