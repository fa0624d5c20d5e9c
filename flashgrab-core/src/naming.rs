//! Unique, filesystem-safe file names derived from source URLs.
//!
//! A name is built from the last path segment of the URL:
//!
//! ```text
//! https://site.com/123-sample-page  ->  samplepage_3f9a01c2.xlsx
//! ```
//!
//! Leading digits and hyphens are stripped, everything that is not an ASCII
//! letter or digit is removed, and the stem is capped at 50 characters
//! before the random suffix is appended.

use std::path::Path;

use tracing::debug;
use url::Url;

/// Maximum length of the URL-derived stem.
pub const MAX_STEM_LEN: usize = 50;

/// Derives a unique file name for `url` with the given extension.
///
/// The extension may be given with or without the leading dot. When the URL
/// cannot be parsed, or nothing usable is left of its last path segment, a
/// fully random name is returned instead.
pub fn unique_filename(url: &str, extension: &str) -> String {
    let extension = normalize_extension(extension);

    match url_stem(url) {
        Some(stem) => format!("{stem}_{}{extension}", random_suffix()),
        None => {
            debug!(url = %url, "No usable stem in URL, using random name");
            random_filename(&extension)
        }
    }
}

/// Returns a fully random file name (32 hex characters) with `extension`.
pub fn random_filename(extension: &str) -> String {
    format!(
        "{:032x}{}",
        rand::random::<u128>(),
        normalize_extension(extension)
    )
}

/// Swaps the extension of `name`, keeping the stem.
///
/// Used to give the intermediate log and the final artifact of one run the
/// same stem.
pub fn sibling_name(name: &str, extension: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    format!("{stem}{}", normalize_extension(extension))
}

/// Extracts the cleaned stem from the last path segment of `url`.
fn url_stem(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().trim_matches('/').rsplit('/').next()?;

    let stem: String = segment
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '-')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_STEM_LEN)
        .collect();

    if stem.is_empty() { None } else { Some(stem) }
}

/// Eight random lowercase hex characters.
fn random_suffix() -> String {
    format!("{:08x}", rand::random::<u32>())
}

fn normalize_extension(extension: &str) -> String {
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}

// ============================================================================
// Tests
// ============================================================================
