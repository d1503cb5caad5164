//! Quote fetching and display preparation

mod fetcher;
mod sanitize;
mod source;

pub use fetcher::{FetchConfig, QuoteFetcher, QuoteProvider, StaticQuote};
pub use sanitize::{sanitize, truncate_for_display, DisplayQuote, MAX_DISPLAY_CHARS};
pub use source::QuoteSource;
