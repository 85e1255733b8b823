use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use signup_config as config;
use std::env;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Write TUI logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn launch(config_path: Option<PathBuf>, args: TuiArgs, verbose: bool) -> Result<()> {
    // Surface config problems here, before the terminal switches screens.
    config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path.clone()) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }
    let mut command = build_command(config_path, args.log_file);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let status = command.status().with_context(|| "launch signup-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(config_path: Option<PathBuf>, log_file: Option<PathBuf>) -> Command {
    let binary = find_tui_binary();
    let mut command = Command::new(binary);
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    if let Some(path) = log_file {
        command.arg("--log-file").arg(path);
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("signup-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "signup-tui binary not found; build it with `cargo build -p signup-tui` or install the package"
        );
    }
    anyhow!("launch signup-tui failed: {}", err)
}
