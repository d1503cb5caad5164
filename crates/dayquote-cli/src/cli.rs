//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use dayquote_core::{Config, QuoteSource};

#[derive(Debug, Parser)]
#[command(name = "dayquote", version, about = "A quote of the day, typed out in your terminal")]
pub struct Args {
    /// Config file (defaults to ~/.dayquote/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Always fetch from this category instead of a random one
    #[arg(long, value_parser = clap::value_parser!(QuoteSource))]
    pub category: Option<QuoteSource>,

    /// Type this text instead of fetching one
    #[arg(long)]
    pub text: Option<String>,

    /// Quote API root
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Skip the startup delay before fetching
    #[arg(long)]
    pub no_delay: bool,

    /// Fetch a new quote every N seconds
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Stop after this many quotes (with --refresh-secs)
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Apply flag overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(category) = self.category {
            config.fetch.category = Some(category);
        }
        if let Some(url) = &self.base_url {
            config.fetch.base_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.fetch.timeout_ms = ms;
        }
        if self.no_delay {
            config.widget.startup_delay_ms = 0;
        }
        if self.refresh_secs.is_some() {
            config.widget.refresh_secs = self.refresh_secs;
        }
        if self.rounds.is_some() {
            config.widget.rounds = self.rounds;
        }
    }
}
