//! Structured error types for RateBot

use thiserror::Error;

/// Failure talking to the upstream price provider.
///
/// The variants carry diagnostic detail for the logs; to callers they all
/// mean the same thing: no price is available right now. The command layer
/// turns any of them into a "try again later" reply.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("unexpected HTTP {status} from upstream")]
    HttpStatus { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("price field missing or not a positive number")]
    MissingPrice,
}
