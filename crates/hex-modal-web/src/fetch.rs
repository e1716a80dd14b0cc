//! Fragment fetching.
//!
//! The full target page is requested and the content element is picked out
//! of it client-side, so any page can double as modal content.

use futures::future::{Either, select};
use gloo::net::http::Request;
use gloo::timers::future::TimeoutFuture;
use hex_modal_core::{Fragment, ModalConfig, ModalError};
use tracing::debug;
use web_sys::{AbortSignal, DomParser, SupportedType};

use crate::dom::dom_error;

/// Fetches `location` and extracts the inner HTML of its content element.
///
/// `timeout_ms == 0` waits indefinitely.
pub async fn fetch_fragment(
    location: &str,
    content_class: &str,
    signal: Option<&AbortSignal>,
    timeout_ms: u32,
) -> Result<Fragment, ModalError> {
    let page = Box::pin(fetch_page(location, signal));

    let html = if timeout_ms == 0 {
        page.await?
    } else {
        match select(page, TimeoutFuture::new(timeout_ms)).await {
            Either::Left((result, _)) => result?,
            Either::Right(((), _)) => {
                return Err(ModalError::Timeout {
                    after_ms: timeout_ms,
                });
            }
        }
    };

    extract_fragment(&html, content_class)
}

async fn fetch_page(location: &str, signal: Option<&AbortSignal>) -> Result<String, ModalError> {
    debug!("Modal request: GET {location}");

    let response = Request::get(location)
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| ModalError::Network(e.to_string()))?;

    let status = response.status();
    debug!("Modal response status: {status}");
    if !response.ok() {
        return Err(ModalError::Http { status });
    }

    response
        .text()
        .await
        .map_err(|e| ModalError::Network(e.to_string()))
}

/// Parses `html` as a document and returns the inner HTML of the first
/// element carrying `content_class`. Everything around it is dropped.
pub fn extract_fragment(html: &str, content_class: &str) -> Result<Fragment, ModalError> {
    let parser = DomParser::new().map_err(dom_error)?;
    let document = parser
        .parse_from_string(html, SupportedType::TextHtml)
        .map_err(dom_error)?;

    let content = document
        .query_selector(&ModalConfig::selector(content_class))
        .map_err(dom_error)?
        .ok_or_else(|| ModalError::MissingFragment {
            class: content_class.to_string(),
        })?;

    Ok(Fragment::new(content.inner_html()))
}
