//! Train ticket booking link

use url::form_urlencoded;

/// Train search page of the ticket booking site
pub const TRAIN_BOOKING_URL: &str = "https://www.irctc.co.in/nget/train-search";

const DEFAULT_FROM: &str = "Mumbai";
const DEFAULT_TO: &str = "Delhi";

/// Search link for trains between two places
///
/// Blank inputs fall back to Mumbai and Delhi.
pub fn train_booking_url(from: &str, to: &str) -> String {
    let from = non_blank_or(from, DEFAULT_FROM);
    let to = non_blank_or(to, DEFAULT_TO);
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("from", from)
        .append_pair("to", to)
        .finish();
    format!("{TRAIN_BOOKING_URL}?{query}")
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
