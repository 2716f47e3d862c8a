//! sitebuild Runtime
//!
//! Runs the site content build: every pass once, in a fixed order, then
//! the `meta.yml` timestamp.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sitebuild_core::SiteConfig;
//! use sitebuild_runtime::Builder;
//!
//! let report = Builder::new(SiteConfig::default()).run()?;
//! if !report.is_success() {
//!     eprintln!("failed passes: {:?}", report.failed());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod passes;

pub use engine::{BuildReport, Builder, PassReport};
pub use error::{Error, Result};
pub use passes::{Pass, PassOutcome};
