//! Shared Runtime

use tokio::runtime::{Builder, Runtime};

/// Multi-thread runtime for the binary; blocking extraction work lands on its
/// blocking pool.
pub(crate) fn build_runtime() -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .enable_all()
        .thread_name("qrawl-text-worker")
        .build()
}
