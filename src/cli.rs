//! CLI definitions for Restyle.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Restyle CLI.
#[derive(Parser)]
#[command(name = "restyle")]
#[command(about = "Fetch third-party pages, render them in a sandbox and restyle them")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch and normalize one page, printing the result as JSON
    Fetch {
        /// Absolute http(s) URL
        url: String,
    },

    /// Load a page and apply a model reply or a canned prompt to it
    Apply {
        /// Absolute http(s) URL
        url: String,

        /// File holding a model reply (JSON instructions, possibly wrapped in prose)
        #[arg(long, conflicts_with = "prompt")]
        reply: Option<PathBuf>,

        /// Prompt handled by the built-in keyword rules
        #[arg(long)]
        prompt: Option<String>,

        /// Select the first element matching this selector before applying
        #[arg(long)]
        select: Option<String>,
    },

    /// Scope a stylesheet under a container selector
    Scope {
        /// CSS file to read
        css_file: PathBuf,

        /// Container selector
        #[arg(long, default_value = ".html-preview")]
        container: String,
    },
}
