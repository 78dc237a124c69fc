use crate::tools::types::{Failure, FailureKind};
use reqwest::StatusCode;
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Validate a raw address into an absolute http(s) URL.
///
/// Surrounding whitespace is ignored. Anything else that is not an absolute
/// URL with a host and an allowed scheme is `InvalidAddress`.
pub fn parse_address(address: &str) -> Result<Url, Failure> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(Failure::invalid_address("empty address"));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| Failure::invalid_address(format!("'{trimmed}' is not a URL ({e})")))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(Failure::invalid_address(format!(
            "scheme '{}' is not allowed",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Failure::invalid_address(format!("'{trimmed}' has no host")));
    }

    Ok(url)
}

/// Map a final response status to `HttpError` unless it is 2xx.
pub(super) fn check_status(status: u16) -> Result<(), Failure> {
    let code = match StatusCode::from_u16(status) {
        Ok(code) if code.is_success() => return Ok(()),
        Ok(code) => code,
        Err(_) => {
            return Err(Failure::new(
                FailureKind::HttpError(status),
                format!("status {status} (invalid)"),
            ))
        }
    };

    let reason = match code {
        StatusCode::TOO_MANY_REQUESTS => "rate limited",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not found",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::INTERNAL_SERVER_ERROR => "server error",
        other => other.canonical_reason().unwrap_or("unknown error"),
    };

    Err(Failure::new(
        FailureKind::HttpError(status),
        format!("status {status} ({reason})"),
    ))
}

/// Classify a reqwest error without collapsing it into a generic message.
pub(super) fn failure_from_reqwest(err: reqwest::Error) -> Failure {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::TooManyRedirects
    } else {
        FailureKind::NetworkError
    };
    Failure::new(kind, err.to_string())
}
