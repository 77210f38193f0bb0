//! HTTP access to the provider-directory validation backend.
//!
//! [`ApiClient`] talks to the backend over HTTP; the [`Backend`] trait is
//! the seam the runtime is written against.

mod backend;
mod client;
mod error;
mod report;

pub use backend::Backend;
pub use client::{
    ApiClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_LONG_TIMEOUT, DEFAULT_TIMEOUT,
};
pub use error::{ApiError, ApiResult, FailureKind};
pub use report::{PDF_CONTENT_TYPE, Report, report_file_name};
