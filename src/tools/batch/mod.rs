//! Batch Tools

mod retry;
mod utils;

pub mod types;

pub use types::*;

use crate::tools::clean::clean_addresses;
use crate::tools::fetch::{parse_address, ReqwestTransport, Transport};
use crate::tools::types::{Failure, Outcome};
use crate::Result;
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, info_span, Instrument};
use utils::run_unit;

/// Batch execute async operations with bounded concurrency.
///
/// At most `concurrency` operations run at once. When `deadline` passes,
/// unfinished operations are dropped (which cancels them) and only the
/// results gathered so far are returned.
pub async fn batch<T, F, Fut, R>(
    items: Vec<T>,
    concurrency: usize,
    deadline: Option<Instant>,
    operation: F,
) -> Vec<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
{
    let pending = stream::iter(items)
        .map(operation)
        .buffer_unordered(concurrency.max(1));
    let mut pending = std::pin::pin!(pending);

    let mut results = Vec::new();
    loop {
        let next = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, pending.next()).await {
                Ok(next) => next,
                Err(_) => break,
            },
            None => pending.next().await,
        };
        match next {
            Some(result) => results.push(result),
            None => break,
        }
    }
    results
}

/// Runs batches of addresses against one shared transport.
///
/// # Examples
/// ```no_run
/// use qrawl_text::{BatchOptions, Coordinator};
///
/// # async fn example() -> qrawl_text::Result<()> {
/// let coordinator = Coordinator::new(BatchOptions::default().with_concurrency(4))?;
/// let report = coordinator.run(&["https://example.com", "https://example.org"]).await;
/// for (address, outcome) in report.iter() {
///     println!("{address}: {}", outcome.label());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Coordinator {
    transport: Arc<dyn Transport>,
    options: BatchOptions,
}

impl Coordinator {
    /// Validate `options` and build the default HTTP transport.
    pub fn new(options: BatchOptions) -> Result<Self> {
        options.validate()?;
        let transport = ReqwestTransport::new(&options.fetch_options())?;
        Ok(Self {
            transport: Arc::new(transport),
            options,
        })
    }

    /// Use a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn Transport>, options: BatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { transport, options })
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Fetch and extract every distinct address.
    ///
    /// Addresses are trimmed, blanks dropped and duplicates collapsed to their
    /// first occurrence. Invalid addresses are reported without touching the
    /// network. Returns once every unit has finished or the overall deadline
    /// passes; units still running then are cancelled and reported as
    /// `Timeout`. Individual failures never abort the batch.
    pub async fn run<S: AsRef<str>>(&self, addresses: &[S]) -> BatchReport {
        let started_at = Utc::now();
        let deadline = Instant::now() + self.options.overall_deadline;
        let keys = clean_addresses(addresses);

        let span = info_span!(
            "batch",
            addresses = keys.len(),
            concurrency = self.options.max_concurrency,
            transport = self.transport.name()
        );

        async move {
            let mut slots: Vec<Option<Outcome>> = vec![None; keys.len()];
            let mut units = Vec::new();
            for (index, key) in keys.iter().enumerate() {
                match parse_address(key) {
                    Ok(_) => units.push((index, key.as_str())),
                    Err(failure) => slots[index] = Some(failure.into()),
                }
            }

            let transport = self.transport.as_ref();
            let options = &self.options;
            let finished = batch(
                units,
                options.max_concurrency,
                Some(deadline),
                move |(index, address)| async move {
                    (index, run_unit(transport, address, options).await)
                },
            )
            .await;

            for (index, outcome) in finished {
                slots[index] = Some(outcome);
            }

            let entries: Vec<(String, Outcome)> = keys
                .into_iter()
                .zip(slots)
                .map(|(key, slot)| {
                    let outcome = slot.unwrap_or_else(|| {
                        Failure::timeout("batch deadline elapsed before completion").into()
                    });
                    (key, outcome)
                })
                .collect();

            let report = BatchReport::new(entries, started_at, Utc::now());
            let summary = report.summary();
            info!(
                total = summary.total,
                extracted = summary.extracted,
                empty = summary.empty,
                failed = summary.failed,
                elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
                "batch finished"
            );
            report
        }
        .instrument(span)
        .await
    }
}

/// One-shot helper: build a [`Coordinator`] and run a single batch.
pub async fn run_batch<S: AsRef<str>>(addresses: &[S], options: BatchOptions) -> Result<BatchReport> {
    let coordinator = Coordinator::new(options)?;
    Ok(coordinator.run(addresses).await)
}
