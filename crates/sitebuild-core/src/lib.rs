//! sitebuild Core Library
//!
//! This crate provides the building blocks of the site content build:
//! - Path configuration
//! - Tracker export discovery and field accessor rules
//! - Normalizers for reading, studies, work activity and the CV page
//! - Front matter handling and the Obsidian notes sync
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Tracker    │────▶│ Normalizer  │────▶│ _data/*.yml │
//! │  JSON       │     │  (rules)    │     │  about.md   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Obsidian   │────▶│ Front matter│────▶│ _logs/*.md  │
//! │  notes      │     │  rewrite    │     │  (mirror)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sitebuild_core::{JsonLoader, normalize::reading};
//!
//! let loader = JsonLoader::new("/var/lib/personal-track");
//! if let Some(export) = loader.load(reading::SOURCE)? {
//!     let books = reading::normalize(&export.data);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod normalize;
pub mod obsidian;
pub mod output;
pub mod rules;
pub mod text;

pub use config::SiteConfig;
pub use error::{Error, Result};
pub use loader::{Export, JsonLoader};
pub use obsidian::{ObsidianSync, SyncReport};
