use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flow2",
    version,
    about = "Publish Markdown posts and their media to a Flow2 site"
)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/flow2/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run one command; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a post from FILE, then upload the files in its sibling `media` folder
    Publish { file: PathBuf },

    /// Replace FILE with the post whose title matches its name
    Pull { file: PathBuf },

    /// Edit the API URL and credentials
    Settings {
        /// Print the resolved settings instead of editing them
        #[arg(long)]
        show: bool,
    },
}
