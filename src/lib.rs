#![doc = include_str!("../README.md")]

pub mod cli;
pub mod error;
pub mod logging;
mod runtime;
pub mod tools;

pub use error::{QrawlError, Result};
pub use tools::batch::{
    run_batch, BatchOptions, BatchReport, BatchRequest, BatchSummary, Coordinator, UrlList,
};
pub use tools::extract::TextMode;
pub use tools::types::{Failure, FailureKind, Outcome, NO_DATA};
