// UI layer: a simple interactive menu using `dialoguer`. Publishing and
// pulling are delegated to `commands`; this module only collects input.

use crate::commands;
use crate::config::Settings;
use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};
use std::path::{Path, PathBuf};

/// Main interactive menu. Runs until the user chooses "Exit".
pub fn main_menu(config_path: &Path) -> Result<()> {
    // Remember the last document so repeated publishes need one keypress.
    let mut last_document: Option<String> = None;
    loop {
        let items = vec!["Publish document", "Pull document", "Settings", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                let file = prompt_document(&mut last_document)?;
                // Failures were already reported as notices.
                commands::publish(config_path, &file)?;
            }
            1 => {
                let file = prompt_document(&mut last_document)?;
                commands::pull(config_path, &file)?;
            }
            2 => edit_settings(config_path)?,
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

fn prompt_document(last: &mut Option<String>) -> Result<PathBuf> {
    let mut input = Input::<String>::new();
    input.with_prompt("Document path");
    if let Some(previous) = last.as_ref() {
        input.default(previous.clone());
    }
    let path = input.interact_text()?;
    *last = Some(path.clone());
    Ok(PathBuf::from(path))
}

/// Settings form. Empty password input keeps the stored password.
pub fn edit_settings(config_path: &Path) -> Result<()> {
    let mut settings = Settings::load(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

    settings.api_base_url = Input::<String>::new()
        .with_prompt("API base URL")
        .default(settings.api_base_url.clone())
        .interact_text()?;
    settings.auth_username = Input::<String>::new()
        .with_prompt("Username")
        .default(settings.auth_username.clone())
        .allow_empty(true)
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password (empty keeps current)")
        .allow_empty_password(true)
        .interact()?;
    if !password.is_empty() {
        settings.auth_password = password;
    }

    settings
        .save(config_path)
        .with_context(|| format!("Failed to save settings to {}", config_path.display()))?;
    println!("Settings saved to {}", config_path.display());
    Ok(())
}
