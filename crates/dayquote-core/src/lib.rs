//! dayquote core library
//!
//! Fetches a short quote from a remote plain-text API and types it into a
//! text surface one character at a time.
//!
//! ## Module Structure
//! - `quote`: sources, fetcher and display sanitizing
//! - `typewriter`: per-target sessions, reveal/blink timing, loading placeholder
//! - `widget`: load → fetch → render orchestration with fallback
//! - `config`: TOML configuration

pub mod config;
pub mod error;
pub mod quote;
pub mod typewriter;
pub mod widget;

pub use config::Config;
pub use error::{ConfigError, FetchError};
pub use quote::{DisplayQuote, QuoteFetcher, QuoteProvider, QuoteSource, StaticQuote};
pub use typewriter::{TargetId, TextTarget, Typewriter};
pub use widget::{QuoteOutcome, QuoteWidget, WidgetConfig};
