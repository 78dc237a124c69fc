use super::retry::{is_retryable, retry_delay};
use super::types::BatchOptions;
use crate::tools::extract::extract_with_mode;
use crate::tools::fetch::{fetch, FetchResult, Transport};
use crate::tools::types::{Failure, FailureKind, Outcome};
use tracing::{debug, instrument, warn};

/// One fetch unit: fetch (with opt-in retries), then extract off the async
/// workers. Always yields an outcome.
#[instrument(level = "debug", skip(transport, options))]
pub(super) async fn run_unit(transport: &dyn Transport, address: &str, options: &BatchOptions) -> Outcome {
    let page = match fetch_with_retries(transport, address, options).await {
        Ok(page) => page,
        Err(failure) => {
            debug!(address, kind = failure.kind.name(), error = %failure.message, "fetch failed");
            return failure.into();
        }
    };

    let mode = options.text_mode;
    let content_type = page.content_type;
    let body = page.body;
    let extracted =
        tokio::task::spawn_blocking(move || extract_with_mode(&body, content_type.as_deref(), mode))
            .await;

    let outcome: Outcome = match extracted {
        Ok(Ok(extraction)) => extraction.into(),
        Ok(Err(failure)) => failure.into(),
        Err(e) => Failure::new(FailureKind::ParseError, format!("extraction task failed: {e}")).into(),
    };

    debug!(address, outcome = outcome.label(), "unit finished");
    outcome
}

async fn fetch_with_retries(
    transport: &dyn Transport,
    address: &str,
    options: &BatchOptions,
) -> FetchResult {
    let mut attempt = 0;
    loop {
        match fetch(transport, address, options.per_request_timeout).await {
            Err(failure) if attempt < options.retries && is_retryable(&failure) => {
                attempt += 1;
                let delay = retry_delay(attempt);
                warn!(
                    address,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %failure,
                    "retrying"
                );
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}
