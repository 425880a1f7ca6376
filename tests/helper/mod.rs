//! Shared utilities for integration tests

#![allow(dead_code)]

pub mod mirror;
pub mod registry;

pub use mirror::create_test_mirror;
pub use registry::{FetchCall, MockRegistry, RecordingDownloader};
