//! Availability API call.
//!
//! Client-side (csr): real HTTP call via `gloo-net`.
//! Native builds: a stub returning a transport error, since the endpoint is
//! only reachable from the page.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (network, non-2xx status, undecodable body) is reported as
//! [`LoadError::Transport`]; a decoded `success: false` body is left for the
//! engine to turn into [`LoadError::Rejected`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use tablemap::error::LoadError;
use tablemap::table::{AvailabilityQuery, AvailabilityResponse};

#[cfg(any(test, feature = "csr"))]
fn status_failed(status: u16) -> LoadError {
    LoadError::Transport(format!("HTTP {status}"))
}

#[cfg(any(test, feature = "csr"))]
fn transport(err: impl std::fmt::Display) -> LoadError {
    LoadError::Transport(err.to_string())
}

/// Query `GET {endpoint}?date=..&time=..&guests=..` for available tables.
///
/// Query values are URL-encoded by the request builder and otherwise passed
/// through unchanged.
///
/// # Errors
///
/// Returns [`LoadError::Transport`] when the request fails, the status is not
/// 2xx, or the body is not a valid availability response.
pub async fn fetch_availability(endpoint: &str, query: &AvailabilityQuery) -> Result<AvailabilityResponse, LoadError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(endpoint)
            .query(query.params())
            .send()
            .await
            .map_err(transport)?;
        if !resp.ok() {
            return Err(status_failed(resp.status()));
        }
        let body = resp.text().await.map_err(transport)?;
        AvailabilityResponse::from_json(&body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (endpoint, query);
        Err(LoadError::Transport("not available outside the browser".to_owned()))
    }
}
