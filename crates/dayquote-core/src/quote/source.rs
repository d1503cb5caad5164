//! Quote categories and their endpoints

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named category variant of the quote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Literature,
    Original,
    Film,
    Poetry,
    Philosophy,
}

impl QuoteSource {
    pub const ALL: [QuoteSource; 5] = [
        QuoteSource::Literature,
        QuoteSource::Original,
        QuoteSource::Film,
        QuoteSource::Poetry,
        QuoteSource::Philosophy,
    ];

    /// Category code sent as the `c` query parameter
    pub fn code(self) -> &'static str {
        match self {
            QuoteSource::Literature => "d",
            QuoteSource::Original => "e",
            QuoteSource::Film => "h",
            QuoteSource::Poetry => "i",
            QuoteSource::Philosophy => "k",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QuoteSource::Literature => "literature",
            QuoteSource::Original => "original",
            QuoteSource::Film => "film",
            QuoteSource::Poetry => "poetry",
            QuoteSource::Philosophy => "philosophy",
        }
    }

    /// Full request URL for this category under `base_url`
    pub fn endpoint(self, base_url: &str) -> String {
        format!(
            "{}/?c={}&encode=text",
            base_url.trim_end_matches('/'),
            self.code()
        )
    }

    /// Pick one category uniformly at random
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        *Self::ALL.choose(&mut rng).unwrap_or(&QuoteSource::Literature)
    }
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for QuoteSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.name().eq_ignore_ascii_case(s) || source.code() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|s| s.name()).collect();
                format!("unknown category '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_endpoint_format() {
        assert_eq!(
            QuoteSource::Poetry.endpoint("https://v1.hitokoto.cn/"),
            "https://v1.hitokoto.cn/?c=i&encode=text"
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes: HashSet<_> = QuoteSource::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes.len(), QuoteSource::ALL.len());
    }

    #[test]
    fn test_parse_by_name_or_code() {
        assert_eq!("Film".parse::<QuoteSource>(), Ok(QuoteSource::Film));
        assert_eq!("k".parse::<QuoteSource>(), Ok(QuoteSource::Philosophy));
        assert!("anime".parse::<QuoteSource>().is_err());
    }

    #[test]
    fn test_random_covers_every_source() {
        let seen: HashSet<_> = (0..500).map(|_| QuoteSource::random()).collect();
        assert_eq!(seen.len(), QuoteSource::ALL.len());
    }
}
