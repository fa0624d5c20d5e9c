//! Page sources and page URL construction.
//!
//! A [`PageSource`] turns a URL into a page body. The real implementation is
//! [`crate::host::http::HttpClient`]; tests substitute canned pages.

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

/// Query parameter carrying the page index.
pub const PAGE_PARAM: &str = "page";

/// Something that can fetch the body of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `url` and returns its body as text.
    ///
    /// Non-success statuses are reported as [`FetchError::Status`].
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds the URL of page `index` of `base`.
///
/// Any existing `page` parameter is replaced; other query parameters are
/// kept in order. The fragment is dropped since it never reaches the server.
pub fn page_url(base: &Url, index: u32) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(PAGE_PARAM, &index.to_string());
    }
    url
}

/// Parses a user-supplied source URL, accepting only http(s).
pub fn parse_source_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme '{other}' in {raw}"
        ))),
    }
}
