//! Build passes
//!
//! A pass loads its inputs, normalizes them and writes one output. Missing
//! or malformed inputs skip the pass with a log line; write and sync
//! failures are returned as errors.

use std::path::PathBuf;

use anyhow::Context;
use serde_json::Value;
use sitebuild_core::normalize::{Profile, Studies, cv, reading, studies, work};
use sitebuild_core::output::{write_text, write_yaml};
use sitebuild_core::{Error as CoreError, JsonLoader, ObsidianSync, SiteConfig};

use crate::error::Result;

/// Result of a pass that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// An output file was (re)written
    Written {
        /// Path of the written file or directory
        path: PathBuf,
        /// Number of records in the output
        records: usize,
    },
    /// The pass had nothing to do
    Skipped {
        /// Why the pass was skipped
        reason: String,
    },
}

impl PassOutcome {
    fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}

/// One step of the build
pub trait Pass {
    /// Short name used in logs and the build report
    fn name(&self) -> &'static str;

    /// Run the pass once
    fn run(&self, config: &SiteConfig) -> Result<PassOutcome>;
}

/// Load an export, turning absence and read failures into a skip reason
fn load(config: &SiteConfig, prefix: &str) -> std::result::Result<Value, String> {
    match JsonLoader::new(&config.raw_data).load(prefix) {
        Ok(Some(export)) => Ok(export.data),
        Ok(None) => Err(format!("no '{prefix}' export")),
        Err(e) => {
            tracing::warn!("{}", e);
            Err(e.to_string())
        }
    }
}

/// Skip a pass whose export has a top-level shape we do not know
fn unrecognized(source: &str) -> PassOutcome {
    let err = CoreError::UnrecognizedShape {
        source_name: source.to_string(),
    };
    tracing::warn!("{}", err);
    PassOutcome::skipped(err.to_string())
}

/// Goodreads -> `_data/reading.yml`
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadingPass;

impl Pass for ReadingPass {
    fn name(&self) -> &'static str {
        "reading"
    }

    fn run(&self, config: &SiteConfig) -> Result<PassOutcome> {
        let export = match load(config, reading::SOURCE) {
            Ok(export) => export,
            Err(reason) => return Ok(PassOutcome::skipped(reason)),
        };
        let Some(books) = reading::normalize(&export) else {
            return Ok(unrecognized(reading::SOURCE));
        };

        let path = config.data_file(reading::OUTPUT);
        write_yaml(&path, &books).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("{} written with {} books", path.display(), books.len());
        Ok(PassOutcome::Written {
            path,
            records: books.len(),
        })
    }
}

/// Coursera + UPSO -> `_data/studies.yml` (always written)
#[derive(Debug, Default, Clone, Copy)]
pub struct StudiesPass;

impl Pass for StudiesPass {
    fn name(&self) -> &'static str {
        "studies"
    }

    fn run(&self, config: &SiteConfig) -> Result<PassOutcome> {
        let coursera = load(config, studies::COURSERA_SOURCE).ok();
        let upso = load(config, studies::UPSO_SOURCE).ok();
        let studies = Studies::from_exports(coursera.as_ref(), upso.as_ref());

        let path = config.data_file(studies::OUTPUT);
        write_yaml(&path, &studies).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            "{} written with {} courses and {} subjects in progress",
            path.display(),
            studies.coursera.len(),
            studies.upso.en_curso.len()
        );
        Ok(PassOutcome::Written {
            path,
            records: studies.coursera.len() + studies.upso.en_curso.len(),
        })
    }
}

/// GitHub activity -> `_data/work.yml`
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkPass;

impl Pass for WorkPass {
    fn name(&self) -> &'static str {
        "work"
    }

    fn run(&self, config: &SiteConfig) -> Result<PassOutcome> {
        let export = match load(config, work::SOURCE) {
            Ok(export) => export,
            Err(reason) => return Ok(PassOutcome::skipped(reason)),
        };
        let Some(activity) = work::normalize(&export) else {
            return Ok(unrecognized(work::SOURCE));
        };

        let path = config.data_file(work::OUTPUT);
        write_yaml(&path, &activity).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            "{} written, commits: {}, repos: {}",
            path.display(),
            activity.commits,
            activity.repos
        );
        Ok(PassOutcome::Written {
            path,
            records: activity.repos as usize,
        })
    }
}

/// LinkedIn -> `about.md`
#[derive(Debug, Default, Clone, Copy)]
pub struct CvPass;

impl Pass for CvPass {
    fn name(&self) -> &'static str {
        "cv"
    }

    fn run(&self, config: &SiteConfig) -> Result<PassOutcome> {
        let export = match load(config, cv::SOURCE) {
            Ok(export) => export,
            Err(reason) => return Ok(PassOutcome::skipped(reason)),
        };
        let Some(profile) = Profile::from_export(&export) else {
            return Ok(unrecognized(cv::SOURCE));
        };

        let page = profile.render().context("rendering about page")?;
        let path = config.cv_file();
        write_text(&path, &page).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("{} generated", path.display());
        Ok(PassOutcome::Written {
            path,
            records: profile.positions.len(),
        })
    }
}

/// Obsidian notes -> `_logs/*.md`
#[derive(Debug, Default, Clone, Copy)]
pub struct ObsidianPass;

impl Pass for ObsidianPass {
    fn name(&self) -> &'static str {
        "obsidian"
    }

    fn run(&self, config: &SiteConfig) -> Result<PassOutcome> {
        let sync = ObsidianSync::new(&config.notes, config.logs_dir());
        match sync.run().context("syncing notes")? {
            Some(report) => Ok(PassOutcome::Written {
                path: config.logs_dir(),
                records: report.published.len(),
            }),
            None => Ok(PassOutcome::skipped(format!(
                "notes directory {} does not exist",
                config.notes.display()
            ))),
        }
    }
}

/// The five passes, in build order
pub fn default_passes() -> Vec<Box<dyn Pass>> {
    vec![
        Box::new(ReadingPass),
        Box::new(StudiesPass),
        Box::new(WorkPass),
        Box::new(CvPass),
        Box::new(ObsidianPass),
    ]
}
