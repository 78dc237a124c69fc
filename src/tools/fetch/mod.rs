mod client;
mod headers;
#[cfg(test)]
pub(crate) mod mock;
mod transport;
mod utils;

pub mod types;

// Re-export types for public use
pub use transport::ReqwestTransport;
pub use types::*;
pub use utils::parse_address;

use crate::tools::types::Failure;
use std::time::{Duration, Instant};
use tracing::debug;
use utils::check_status;

/// Fetch one address with a bounded timeout.
///
/// The address is validated first: anything that is not an absolute
/// `http`/`https` URL fails with `InvalidAddress` and the transport is never
/// called. The timeout bounds the whole exchange, body included, whatever the
/// transport does on its own. Non-2xx responses become `HttpError(status)`.
///
/// No retries happen here.
///
/// # Examples
/// ```no_run
/// use qrawl_text::tools::fetch::{fetch, FetchOptions, ReqwestTransport};
/// use qrawl_text::tools::types::FailureKind;
/// use std::time::Duration;
///
/// # async fn example() -> qrawl_text::Result<()> {
/// let transport = ReqwestTransport::new(&FetchOptions::default())?;
/// match fetch(&transport, "https://example.com/missing", Duration::from_secs(5)).await {
///     Ok(page) => println!("{} bytes", page.body.len()),
///     Err(failure) if failure.kind == FailureKind::HttpError(404) => println!("gone"),
///     Err(failure) => println!("{failure}"),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch<T>(transport: &T, address: &str, timeout: Duration) -> FetchResult
where
    T: Transport + ?Sized,
{
    let url = parse_address(address)?;
    let start = Instant::now();

    debug!(%url, transport = transport.name(), timeout_ms = timeout.as_millis() as u64, "fetching");

    let response = match tokio::time::timeout(timeout, transport.get(&url, timeout)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(Failure::timeout(format!(
                "no complete response within {}ms",
                timeout.as_millis()
            )))
        }
    };

    check_status(response.status)?;

    let duration_ms = start.elapsed().as_millis() as u64;
    debug!(
        url = %response.final_url,
        status = response.status,
        bytes = response.body.len(),
        duration_ms,
        "fetched"
    );

    Ok(FetchedPage {
        url: response.final_url,
        status: response.status,
        content_type: response.content_type,
        body: response.body,
        duration_ms,
    })
}
