//! Obsidian notes -> `_logs/*.md`
//!
//! A note is published when its front matter status is `publicar`. Each
//! published note is rewritten as `{date}-{slug}.md`; afterwards any log
//! file not produced by this run is deleted, so the logs directory mirrors
//! exactly the set of publishable notes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};
use serde_yaml::{Mapping, Value};
use walkdir::WalkDir;

use crate::error::Result;
use crate::frontmatter::{self, Document};
use crate::output::write_text;
use crate::text::{parse_date, slugify};

/// Status value that marks a note for publication
pub const PUBLISH_MARKER: &str = "publicar";

/// Layout assigned to notes that do not choose one
pub const DEFAULT_LAYOUT: &str = "post";

const STATUS_KEYS: &[&str] = &["status", "estado"];
const TITLE_KEYS: &[&str] = &["title", "nombre", "titulo"];
const DATE_KEYS: &[&str] = &["date", "fecha", "created", "created_at"];

/// A note ready to be written to the logs directory
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedNote {
    /// Source note
    pub source: PathBuf,
    /// `{date}-{slug}.md`
    pub file_name: String,
    /// Rewritten document
    pub content: String,
    /// Modification time of the source, used to settle name collisions
    pub modified: SystemTime,
}

/// Turn a note into its published form.
///
/// Returns `Ok(None)` when the note has no front matter or is not marked
/// for publication.
pub fn prepare(
    source: &Path,
    content: &str,
    modified: SystemTime,
) -> Result<Option<PublishedNote>> {
    let doc = Document::parse(content);
    let Some(header) = doc.header else {
        return Ok(None);
    };

    let status = frontmatter::first(&header, STATUS_KEYS)
        .map(frontmatter::display)
        .unwrap_or_default();
    if status.trim().to_lowercase() != PUBLISH_MARKER {
        return Ok(None);
    }

    let title = frontmatter::first(&header, TITLE_KEYS)
        .map(frontmatter::display)
        .unwrap_or_else(|| {
            source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    // an explicit slug names a file too, so it goes through the same filter
    let slug = slugify(
        &frontmatter::first(&header, &["slug"])
            .map(frontmatter::display)
            .unwrap_or(title),
    );

    let fallback = DateTime::<Local>::from(modified).date_naive();
    let date = note_date(frontmatter::first(&header, DATE_KEYS), fallback);
    let date_str = date.format("%Y-%m-%d").to_string();

    let mut out = header;
    out.remove("status");
    set_default(&mut out, "date", &date_str);
    out.insert("slug".into(), slug.as_str().into());
    set_default(&mut out, "layout", DEFAULT_LAYOUT);

    let content = format!(
        "{}{}",
        frontmatter::build(&out)?,
        doc.body.trim_start_matches('\n')
    );

    Ok(Some(PublishedNote {
        source: source.to_path_buf(),
        file_name: format!("{date_str}-{slug}.md"),
        content,
        modified,
    }))
}

fn note_date(value: Option<&Value>, fallback: NaiveDate) -> NaiveDate {
    match value {
        Some(Value::String(s)) => parse_date(s).unwrap_or(fallback),
        _ => fallback,
    }
}

fn set_default(header: &mut Mapping, key: &str, value: &str) {
    if !header.contains_key(key) {
        header.insert(key.into(), value.into());
    }
}

/// What a sync run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Log files written, by file name
    pub published: BTreeSet<String>,
    /// Notes seen but not published (no header, other status, unreadable)
    pub skipped: usize,
    /// Orphaned log files deleted
    pub removed: Vec<String>,
    /// Notes that lost a file name collision
    pub collisions: usize,
}

/// Mirrors publishable notes into the logs directory
#[derive(Debug, Clone)]
pub struct ObsidianSync {
    notes_dir: PathBuf,
    logs_dir: PathBuf,
}

impl ObsidianSync {
    /// Create a sync from `notes_dir` into `logs_dir`
    pub fn new(notes_dir: impl Into<PathBuf>, logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            logs_dir: logs_dir.into(),
        }
    }

    /// Run the sync.
    ///
    /// Returns `Ok(None)` without touching the logs directory when the
    /// notes directory does not exist.
    pub fn run(&self) -> Result<Option<SyncReport>> {
        if !self.notes_dir.exists() {
            tracing::info!("notes directory does not exist: {}", self.notes_dir.display());
            return Ok(None);
        }
        std::fs::create_dir_all(&self.logs_dir)?;

        let mut report = SyncReport::default();
        let mut selected: BTreeMap<String, PublishedNote> = BTreeMap::new();

        for path in self.note_paths() {
            let Some(note) = self.read_note(&path)? else {
                report.skipped += 1;
                continue;
            };

            let replace = match selected.get(&note.file_name) {
                Some(existing) => {
                    let newer = note.modified >= existing.modified;
                    tracing::warn!(
                        "{} and {} both map to {}; keeping the newer {}",
                        existing.source.display(),
                        note.source.display(),
                        note.file_name,
                        (if newer { &note.source } else { &existing.source }).display()
                    );
                    report.collisions += 1;
                    newer
                }
                None => true,
            };
            if replace {
                selected.insert(note.file_name.clone(), note);
            }
        }

        for (file_name, note) in &selected {
            write_text(&self.logs_dir.join(file_name), &note.content)?;
            tracing::info!(
                "published note: {} -> {}",
                note.source
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default(),
                file_name
            );
            report.published.insert(file_name.clone());
        }

        report.removed = self.remove_orphans(&report.published)?;
        tracing::info!("logs complete, published: {}", report.published.len());
        Ok(Some(report))
    }

    /// Markdown files below the notes directory, in path order
    fn note_paths(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.notes_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
            .map(|e| e.into_path())
            .collect()
    }

    fn read_note(&self, path: &Path) -> Result<Option<PublishedNote>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("could not read note {}: {}", path.display(), e);
                return Ok(None);
            }
        };
        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!("could not stat note {}: {}", path.display(), e);
                return Ok(None);
            }
        };
        prepare(path, &content, modified)
    }

    /// Delete `*.md` files in the logs directory that this run did not write
    fn remove_orphans(&self, keep: &BTreeSet<String>) -> Result<Vec<String>> {
        let mut orphans: Vec<PathBuf> = std::fs::read_dir(&self.logs_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_none_or(|name| !keep.contains(name))
            })
            .collect();
        orphans.sort();

        let mut removed = Vec::new();
        for orphan in orphans {
            let name = orphan
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match std::fs::remove_file(&orphan) {
                Ok(()) => {
                    tracing::info!("removed orphaned log: {}", name);
                    removed.push(name);
                }
                Err(e) => tracing::warn!("could not remove orphaned log {}: {}", orphan.display(), e),
            }
        }
        Ok(removed)
    }
}
