//! Synchronous API client core for the feed aggregation service.
//!
//! # Overview
//! Manages feeds, streams and the stream assignments linking them over the
//! service's authenticated JSON API. Every operation returns a typed value
//! or an `ApiError`; nothing here prints or exits.
//!
//! # Design
//! - `ApiClient` snapshots the base URL and token from a `ConfigProvider`
//!   and performs each call through one generic `request` method.
//! - The HTTP round trip sits behind the `Transport` trait. `UreqTransport`
//!   is the blocking production transport; tests substitute their own.
//! - Resource operations live in `feeds`, `streams` and `assignments` as
//!   `impl` blocks on `ApiClient`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod assignments;
pub mod client;
pub mod config;
pub mod error;
pub mod feeds;
pub mod http;
pub mod streams;
pub mod types;

#[cfg(test)]
mod testutil;

pub use client::{parse_response, ApiClient};
pub use config::{ClientConfig, ConfigProvider};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{Feed, Stream, StreamAssignmentFeed};
