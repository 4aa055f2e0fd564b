//! Common data structs and naming rules shared by the imgzip crates.
//!
//! Everything in here is pure: describing an image found on a page, picking the
//! size tier folder it belongs in, validating its extension and turning its alt
//! text into something safe to use as a file name.

// Public Exports
pub use bytes;
pub use chrono;
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;

use log::debug;
use reqwest::Url;

pub mod descriptor;
pub mod error;
pub mod extension;
pub mod sanitize;
pub mod tier;

/// Derives the grouping key of a run from the address of the page the images were found on.
///
/// The key is the bare hostname, with a leading `www.` dropped so that `www.example.com` and
/// `example.com` end up in the same folder.
///
/// Returns `None` if the address can't be parsed or has no host (e.g. `file:` or `data:` URLs).
///
/// ```
/// # use imgzip_common::group_from_page_url;
/// assert_eq!(group_from_page_url("https://www.example.com/gallery?p=2").as_deref(), Some("example.com"));
/// assert_eq!(group_from_page_url("not a url"), None);
/// ```
pub fn group_from_page_url(page_url: &str) -> Option<String> {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(error) => {
            debug!("Can't derive group from {}: {}", page_url, error);
            return None;
        }
    };

    let host = url.host_str()?;
    let group = host.strip_prefix("www.").unwrap_or(host);

    if group.is_empty() {
        return None;
    }

    Some(group.to_string())
}
