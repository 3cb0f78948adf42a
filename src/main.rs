// Entrypoint for the CLI application.
// - With a subcommand, runs it once and exits non-zero if any phase failed.
// - Without one, starts the interactive menu.

use clap::Parser;
use flow2_publish::cli::{Cli, Command};
use flow2_publish::config::Settings;
use flow2_publish::{commands, ui};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Settings::default_path);

    let ok = match cli.command {
        None => {
            ui::main_menu(&config_path)?;
            true
        }
        Some(Command::Publish { file }) => commands::publish(&config_path, &file)?.is_success(),
        Some(Command::Pull { file }) => commands::pull(&config_path, &file)?.is_success(),
        Some(Command::Settings { show: true }) => {
            commands::show_settings(&config_path)?;
            true
        }
        Some(Command::Settings { show: false }) => {
            ui::edit_settings(&config_path)?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
