use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,qrawl_text=debug";

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise any `verbose` count turns on tracing
/// for this crate. Stdout is
/// left alone so it only ever carries report JSON. Calling this twice is a
/// no-op.
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose == 0 {
            DEFAULT_FILTER
        } else {
            "debug,qrawl_text=trace"
        })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
