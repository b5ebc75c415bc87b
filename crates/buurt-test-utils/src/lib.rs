//! Test fixtures for buurt development.
//!
//! Provides deterministic point sets for unit tests, integration tests and
//! benchmarks, plus a small sample of the semicolon-separated input format.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
