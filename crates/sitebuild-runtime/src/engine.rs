//! Build engine

use chrono::Local;
use serde::Serialize;
use sitebuild_core::SiteConfig;
use sitebuild_core::output::write_yaml;

use crate::error::Result;
use crate::passes::{Pass, PassOutcome, default_passes};

/// Build metadata file, under `_data/`
pub const META_FILE: &str = "meta.yml";

/// `last_update` format, local time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
struct Meta {
    last_update: String,
}

/// Outcome of a single pass inside a build
#[derive(Debug)]
pub struct PassReport {
    /// Pass name
    pub name: &'static str,
    /// What the pass did, or why it failed
    pub result: std::result::Result<PassOutcome, String>,
}

/// What a build did
#[derive(Debug, Default)]
pub struct BuildReport {
    /// One entry per pass, in run order
    pub passes: Vec<PassReport>,
    /// Value written to `meta.yml`
    pub last_update: String,
}

impl BuildReport {
    /// Names of the passes that failed
    pub fn failed(&self) -> Vec<&'static str> {
        self.passes
            .iter()
            .filter(|p| p.result.is_err())
            .map(|p| p.name)
            .collect()
    }

    /// True when no pass failed
    pub fn is_success(&self) -> bool {
        self.passes.iter().all(|p| p.result.is_ok())
    }
}

/// Runs every pass once, in order, then stamps `meta.yml`
pub struct Builder {
    config: SiteConfig,
    passes: Vec<Box<dyn Pass>>,
}

impl Builder {
    /// Create a builder with the default passes
    pub fn new(config: SiteConfig) -> Self {
        Self::with_passes(config, default_passes())
    }

    /// Create a builder with a custom pass list
    pub fn with_passes(config: SiteConfig, passes: Vec<Box<dyn Pass>>) -> Self {
        Self { config, passes }
    }

    /// Run the build.
    ///
    /// Fails before writing anything when the raw data root is missing.
    /// A failing pass is logged and recorded; the remaining passes still run.
    pub fn run(&self) -> Result<BuildReport> {
        let raw = self.config.ensure_raw_data()?;
        tracing::info!("building site from {}", raw.display());

        std::fs::create_dir_all(self.config.data_dir())?;
        std::fs::create_dir_all(self.config.logs_dir())?;

        let mut report = BuildReport::default();
        for pass in &self.passes {
            let result = match pass.run(&self.config) {
                Ok(outcome) => {
                    if let PassOutcome::Skipped { reason } = &outcome {
                        tracing::debug!("pass {} skipped: {}", pass.name(), reason);
                    }
                    Ok(outcome)
                }
                Err(e) => {
                    tracing::error!("pass {} failed: {:#}", pass.name(), e);
                    Err(format!("{e:#}"))
                }
            };
            report.passes.push(PassReport {
                name: pass.name(),
                result,
            });
        }

        report.last_update = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let meta = Meta {
            last_update: report.last_update.clone(),
        };
        write_yaml(&self.config.data_file(META_FILE), &meta)?;
        tracing::info!("build complete, last update: {}", report.last_update);

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Recording {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl Pass for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&self, _config: &SiteConfig) -> Result<PassOutcome> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                Err(anyhow!("boom"))
            } else {
                Ok(PassOutcome::Skipped {
                    reason: "test".to_string(),
                })
            }
        }
    }

    fn recording(
        names: &[(&'static str, bool)],
    ) -> (Vec<Box<dyn Pass>>, Rc<RefCell<Vec<&'static str>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let passes = names
            .iter()
            .map(|&(name, fail)| {
                Box::new(Recording {
                    name,
                    log: Rc::clone(&log),
                    fail,
                }) as Box<dyn Pass>
            })
            .collect();
        (passes, log)
    }

    fn site(dir: &TempDir) -> SiteConfig {
        let raw = dir.path().join("raw");
        std::fs::create_dir_all(&raw).unwrap();
        SiteConfig::new(raw, dir.path().join("notes"), dir.path().join("site"))
    }

    #[test]
    fn test_missing_raw_data_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::new(
            dir.path().join("missing"),
            dir.path().join("notes"),
            dir.path().join("site"),
        );
        let (passes, log) = recording(&[("a", false)]);

        assert!(Builder::with_passes(config, passes).run().is_err());
        assert!(log.borrow().is_empty());
        assert!(!dir.path().join("site").exists());
    }

    #[rstest]
    #[case(&[("a", false), ("b", false)], true)]
    #[case(&[("a", true), ("b", false)], false)]
    #[case(&[("a", false), ("b", true)], false)]
    fn test_every_pass_runs_in_order(
        #[case] names: &[(&'static str, bool)],
        #[case] success: bool,
    ) {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        let (passes, log) = recording(names);

        let report = Builder::with_passes(config.clone(), passes).run().unwrap();

        assert_eq!(*log.borrow(), ["a", "b"]);
        assert_eq!(report.is_success(), success);
        assert_eq!(report.failed().is_empty(), success);
        assert!(config.data_file(META_FILE).exists());
    }

    #[test]
    fn test_meta_written_with_timestamp() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let report = Builder::with_passes(config.clone(), Vec::new()).run().unwrap();

        let yaml = std::fs::read_to_string(config.data_file(META_FILE)).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed["last_update"].as_str(), Some(report.last_update.as_str()));
        assert!(
            chrono::NaiveDateTime::parse_from_str(&report.last_update, TIMESTAMP_FORMAT).is_ok()
        );
        assert!(config.logs_dir().is_dir());
    }
}
