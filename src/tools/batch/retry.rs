use crate::tools::types::{Failure, FailureKind};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const BASE_DELAY_MS: u64 = 200;
const MAX_DELAY_MS: u64 = 2_000;
const JITTER_RANGE_MS: u64 = 100;

/// Random-ish jitter in milliseconds within [0, range).
pub(super) fn jitter_ms(range: u64) -> u64 {
    if range == 0 {
        return 0;
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_nanos(0));
    let nanos = now.subsec_nanos() as u64;
    let micros = (now.as_micros() & 0xFFFF) as u64;
    (nanos ^ (micros << 5)) % range
}

/// Only transient transport failures are worth another attempt.
pub(super) fn is_retryable(failure: &Failure) -> bool {
    matches!(failure.kind, FailureKind::NetworkError | FailureKind::Timeout)
}

/// Exponential backoff for the given 1-based attempt, capped, plus jitter.
pub(super) fn retry_delay(attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    let base = BASE_DELAY_MS.saturating_mul(1 << exp).min(MAX_DELAY_MS);
    Duration::from_millis(base + jitter_ms(JITTER_RANGE_MS))
}
