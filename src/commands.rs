// One-shot commands shared by the CLI subcommands and the interactive menu.
// Each command resolves settings fresh, so edits made in the settings form
// apply to the very next publish or pull.

use crate::api::ApiClient;
use crate::config::Settings;
use crate::fs_host::FsHost;
use crate::host::Notifier;
use crate::workflow::{PublishReport, PullReport, Workflow};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner shown while a request is in flight. Notices are printed above
/// it so they stay on screen after the spinner is cleared.
pub struct SpinnerNotifier {
    bar: ProgressBar,
}

impl SpinnerNotifier {
    pub fn start(message: &'static str) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(SpinnerNotifier { bar })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Notifier for SpinnerNotifier {
    fn notify(&self, message: &str) {
        // A hidden bar (stdout is not a terminal) swallows `println`.
        if self.bar.is_hidden() {
            println!("{}", message);
        } else {
            self.bar.println(message);
        }
    }
}

fn client(config_path: &Path) -> Result<ApiClient> {
    let settings = Settings::resolve(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    ApiClient::new(settings).context("Failed to build HTTP client")
}

/// Publish `file` and upload its media folder.
pub fn publish(config_path: &Path, file: &Path) -> Result<PublishReport> {
    let api = client(config_path)?;
    let host = FsHost::new(file);
    let spinner = SpinnerNotifier::start("Publishing...")?;
    let report = Workflow::new(&api, &host, &spinner).publish_active();
    spinner.finish();
    Ok(report)
}

/// Pull the post titled after `file` into it.
pub fn pull(config_path: &Path, file: &Path) -> Result<PullReport> {
    let api = client(config_path)?;
    let host = FsHost::new(file);
    let spinner = SpinnerNotifier::start("Searching...")?;
    let report = Workflow::new(&api, &host, &spinner).pull_active();
    if let PullReport::Pulled = report {
        spinner.notify(&format!("Pulled post into {}", file.display()));
    }
    spinner.finish();
    Ok(report)
}

/// Hide a password except for whether one is set.
pub fn mask(password: &str) -> &'static str {
    if password.is_empty() {
        "(empty)"
    } else {
        "********"
    }
}

pub fn show_settings(config_path: &Path) -> Result<()> {
    let settings = Settings::resolve(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    println!("settings file: {}", config_path.display());
    println!("apiBaseUrl:    {}", settings.api_base_url);
    println!("authUsername:  {}", settings.auth_username);
    println!("authPassword:  {}", mask(&settings.auth_password));
    Ok(())
}
