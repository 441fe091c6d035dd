//! Years-of-experience mentions ("3-5 years", "5+ years", "2 years").

use once_cell::sync::Lazy;
use regex::Regex;

static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:-|–|—|to)\s*(\d+)\s*years").unwrap());

static OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\+?\s*years").unwrap());

/// `(min, max)` for every "N-M years" mention, in text order.
pub fn range_mentions(text: &str) -> Vec<(u32, u32)> {
    RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let min = caps.get(1)?.as_str().parse().ok()?;
            let max = caps.get(2)?.as_str().parse().ok()?;
            Some((min, max))
        })
        .collect()
}

/// `N` for every "N years" / "N+ years" mention, in text order.
///
/// The upper bound of a range ("3-5 years" → 5) is also reported here.
pub fn open_mentions(text: &str) -> Vec<u32> {
    OPEN_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

pub fn max_open_mention(text: &str) -> Option<u32> {
    open_mentions(text).into_iter().max()
}
