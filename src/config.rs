//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{ActorId, SourceType};

/// Command line configuration for meedu-notify.
#[derive(Debug, Clone, Parser)]
#[command(name = "meedu-notify", version, about, long_about = None)]
pub struct Config {
    /// JSON fixture file with actors, content and notifications
    #[arg(short, long, global = true, default_value = "fixtures.json")]
    pub fixtures: PathBuf,

    /// Base URL prepended to notification links
    #[arg(long, global = true, default_value = "")]
    pub base_url: String,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Extract mentions from text and print the published events
    Mentions {
        /// Author of the text
        #[arg(long)]
        from_user: ActorId,

        /// Id of the comment containing the text
        #[arg(long)]
        from_id: u64,

        /// Comment type (CourseComment, VideoComment)
        #[arg(long)]
        from_type: SourceType,

        /// Text to scan
        text: String,
    },

    /// Render stored notifications
    Render {
        /// Only render notifications for this recipient
        #[arg(long)]
        recipient: Option<ActorId>,
    },

    /// Print sanitized markdown of a file
    Clean {
        /// Markdown file
        file: PathBuf,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the fixture file is needed but missing, or if the
    /// markdown file to clean does not exist.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Clean { file } => {
                if !file.exists() {
                    bail!("Markdown file does not exist: {}", file.display());
                }
            }
            Command::Mentions { .. } | Command::Render { .. } => {
                if !self.fixtures.exists() {
                    bail!("Fixture file does not exist: {}", self.fixtures.display());
                }
            }
        }

        Ok(())
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
