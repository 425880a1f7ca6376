//! Update layer: scan-and-decide pass over a local package mirror
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Inventory  │────▶│   Decider   │────▶│  Executor   │
//! │ (local max) │     │ (remote cmp)│     │ (download)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Registry   │     │ Downloader  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`inventory`]: Highest local version per package
//! - [`decider`]: Newer qualifying remote version per package
//! - [`executor`]: Reports and runs the downloads
//! - [`downloader`]: Downloader trait and `pip download` implementation
//! - [`console`]: Console sink and progress markers
//! - [`run`]: One complete pass wiring the above together

pub mod console;
pub mod decider;
pub mod downloader;
pub mod executor;
pub mod inventory;
pub mod run;
