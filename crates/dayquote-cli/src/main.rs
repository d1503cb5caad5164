//! dayquote - a quote of the day, typed out in your terminal

mod cli;
mod logging;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dayquote_core::{
    Config, DisplayQuote, QuoteFetcher, QuoteProvider, QuoteWidget, StaticQuote, TextTarget,
    Typewriter,
};
use tracing::info;

use cli::Args;
use terminal::TerminalLine;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = Config::load(args.config.as_deref()).context("loading config")?;
    args.apply(&mut config);

    let provider: Arc<dyn QuoteProvider> = match &args.text {
        Some(text) => {
            let quote = DisplayQuote::from_raw(text).context("--text is blank")?;
            Arc::new(StaticQuote(quote))
        }
        None => Arc::new(QuoteFetcher::new(config.fetch.clone())),
    };

    let typewriter = Typewriter::new(config.typewriter.clone());
    let widget = QuoteWidget::new(provider, typewriter.clone(), config.widget.clone());

    let line = Arc::new(TerminalLine::new("quote"));
    line.begin().context("preparing terminal")?;
    let target: Arc<dyn TextTarget> = line.clone();

    tokio::select! {
        _ = widget.run(target) => {
            info!("Quote finished");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    typewriter.shutdown();
    line.finish().context("restoring terminal")?;
    Ok(())
}
