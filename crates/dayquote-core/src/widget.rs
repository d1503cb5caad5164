//! Quote widget orchestration
//!
//! Loading placeholder → startup delay → fetch → typewriter. Fetch failures
//! are logged and masked with a fallback quote; they never reach the target
//! as raw errors.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::quote::{DisplayQuote, QuoteProvider};
use crate::typewriter::{TextTarget, Typewriter};

const DEFAULT_FALLBACK: &str = "Stay hungry, stay foolish.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Delay between showing the placeholder and fetching
    pub startup_delay_ms: u64,
    pub loading_label: String,
    pub loading_interval_ms: u64,
    pub failure_message: String,
    /// How long the failure message stays before the fallback is typed
    pub failure_notice_ms: u64,
    pub fallback_quote: String,
    /// Fetch a new quote this often. `None` shows one quote and stops.
    pub refresh_secs: Option<u64>,
    /// Stop after this many quotes when refreshing. `None` refreshes forever.
    pub rounds: Option<u32>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: 3000,
            loading_label: "Loading".to_string(),
            loading_interval_ms: 500,
            failure_message: "Failed to load, using default".to_string(),
            failure_notice_ms: 1000,
            fallback_quote: DEFAULT_FALLBACK.to_string(),
            refresh_secs: None,
            rounds: None,
        }
    }
}

impl WidgetConfig {
    /// Configured fallback, sanitized; the built-in one if it is blank
    fn fallback(&self) -> String {
        DisplayQuote::from_raw(&self.fallback_quote)
            .map(DisplayQuote::into_string)
            .unwrap_or_else(|| DEFAULT_FALLBACK.to_string())
    }
}

/// What a single round ended up showing
#[derive(Debug)]
pub enum QuoteOutcome {
    Fetched(DisplayQuote),
    Fallback(FetchError),
    /// Refresh failed; the previous quote stays on screen
    Kept(FetchError),
}

pub struct QuoteWidget {
    provider: Arc<dyn QuoteProvider>,
    typewriter: Typewriter,
    config: WidgetConfig,
}

impl QuoteWidget {
    pub fn new(provider: Arc<dyn QuoteProvider>, typewriter: Typewriter, config: WidgetConfig) -> Self {
        Self {
            provider,
            typewriter,
            config,
        }
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// First quote: placeholder, delay, fetch, then type the quote or the
    /// fallback. Returns once typing has started.
    pub async fn show_first(&self, target: &Arc<dyn TextTarget>) -> QuoteOutcome {
        self.typewriter.show_loading(
            target.clone(),
            &self.config.loading_label,
            Duration::from_millis(self.config.loading_interval_ms),
        );
        tokio::time::sleep(Duration::from_millis(self.config.startup_delay_ms)).await;

        match self.provider.fetch_quote().await {
            Ok(quote) => {
                self.typewriter.render(target.clone(), quote.as_str());
                QuoteOutcome::Fetched(quote)
            }
            Err(e) => {
                warn!(reason = e.reason(), error = %e, "Quote fetch failed, using fallback");
                self.typewriter
                    .show_message(target.clone(), &self.config.failure_message);
                tokio::time::sleep(Duration::from_millis(self.config.failure_notice_ms)).await;
                self.typewriter
                    .render(target.clone(), &self.config.fallback());
                QuoteOutcome::Fallback(e)
            }
        }
    }

    /// Replace the current quote with a fresh one. On failure the current
    /// quote stays.
    pub async fn refresh(&self, target: &Arc<dyn TextTarget>) -> QuoteOutcome {
        match self.provider.fetch_quote().await {
            Ok(quote) => {
                self.typewriter.render(target.clone(), quote.as_str());
                QuoteOutcome::Fetched(quote)
            }
            Err(e) => {
                warn!(reason = e.reason(), error = %e, "Quote refresh failed, keeping current quote");
                QuoteOutcome::Kept(e)
            }
        }
    }

    /// Run the widget on `target` until the last quote finishes blinking
    pub async fn run(&self, target: Arc<dyn TextTarget>) {
        let mut shown = 1u32;
        self.show_first(&target).await;

        if let Some(secs) = self.config.refresh_secs {
            let every = Duration::from_secs(secs.max(1));
            while self.config.rounds.map_or(true, |rounds| shown < rounds) {
                tokio::time::sleep(every).await;
                self.refresh(&target).await;
                shown += 1;
                info!(round = shown, "Refreshed quote");
            }
        }

        self.typewriter.finished(&target.id()).await;
    }
}
