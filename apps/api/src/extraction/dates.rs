//! Date token parsing for resume lines. Two shapes are recognized:
//! `M/YYYY` (resolved to the first of that month) and a bare 4-digit year
//! in 1900-2099 (resolved to January 1). Anything unparsable is simply
//! absent, never an error.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

fn date_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // M/YYYY first so the year inside it is not double-counted.
        Regex::new(r"\b(?:(0?[1-9]|1[0-2])/((?:19|20)\d{2})|((?:19|20)\d{2}))\b")
            .expect("date token regex is valid")
    })
}

/// All date tokens in a line, in textual order.
pub fn date_tokens(line: &str) -> Vec<NaiveDate> {
    date_token_re()
        .captures_iter(line)
        .filter_map(|caps| {
            if let (Some(month), Some(year)) = (caps.get(1), caps.get(2)) {
                let month: u32 = month.as_str().parse().ok()?;
                let year: i32 = year.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, 1)
            } else {
                let year: i32 = caps.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        })
        .collect()
}

pub fn has_date_token(line: &str) -> bool {
    date_token_re().is_match(line)
}

/// Start/end disambiguation: the first token on a line is the start date,
/// the second (if any) the end date.
pub fn parse_date_range(line: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut tokens = date_tokens(line).into_iter();
    (tokens.next(), tokens.next())
}
