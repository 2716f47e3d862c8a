//! Text helpers: slugs, citation cleanup and loose date parsing

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Longest slug produced by [`slugify`]
pub const SLUG_MAX_LEN: usize = 80;

/// Slug used when a title has no usable characters
pub const SLUG_FALLBACK: &str = "nota-sin-titulo";

static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[cite(?:_start|_end|:[^\]]*)\]").expect("valid citation regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*•[ \t]+").expect("valid bullet regex"));
static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank-run regex"));

/// Turn a title into a URL-safe identifier.
///
/// Lowercases, strips diacritics, collapses every run of characters outside
/// `[a-z0-9]` into one hyphen and caps the result at [`SLUG_MAX_LEN`].
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut gap = false;
    for c in lowered.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c);
        } else {
            gap = true;
        }
    }

    if slug.len() > SLUG_MAX_LEN {
        slug.truncate(SLUG_MAX_LEN);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }

    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug
    }
}

/// Tidy text pasted from a CV export.
///
/// Drops `[cite_start]`, `[cite_end]` and `[cite: ...]` markers, turns a
/// leading `•` into a Markdown list marker and squeezes runs of blank lines
/// down to one.
pub fn clean_markdown(text: &str) -> String {
    let text = CITATION_RE.replace_all(text, "");
    let text = BULLET_RE.replace_all(&text, "- ");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Parse the date part of an ISO-like string (`2024-03-01`,
/// `2024-03-01T10:00:00Z`, `2024-03-01 10:00`, ...)
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            text.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
