//! Diagnosis and rewrite pipeline.
//!
//! The driver orchestrates one operation using the container adapter and
//! the per-entry policy. Every call reads its source once and builds a fresh
//! report; nothing is shared between calls.

use std::collections::HashSet;
use std::io::{Read, Seek};
use std::path::Path;

use crate::adapter::{ZipAdapter, ZipSink};
use crate::entry::ArchiveEntry;
use crate::error::Error;
use crate::options::ProcessingOptions;
use crate::policy::{Decision, Disposition, EntryPolicy};
use crate::repair::Repairer;
use crate::report::{DiagnosticReport, ReportBuilder};

/// A rebuilt archive and the report describing what was dropped or renamed.
#[derive(Debug, Clone)]
pub struct RewriteOutput {
    pub archive: Vec<u8>,
    pub report: DiagnosticReport,
}

/// A file from host storage, addressed by its path relative to the archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFile {
    pub path: String,
    pub data: Vec<u8>,
}

impl HostFile {
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }
}

impl<P: Into<String>> From<(P, Vec<u8>)> for HostFile {
    fn from((path, data): (P, Vec<u8>)) -> Self {
        Self::new(path, data)
    }
}

/// Runs diagnosis and rewrites with one configuration.
///
/// # Example
///
/// ```no_run
/// use zipmend::{Driver, ProcessingOptions, ZipAdapter};
///
/// let driver = Driver::new().options(ProcessingOptions::default().remove_hidden_files(true));
///
/// let report = driver.diagnose(ZipAdapter::open("archive.zip")?)?;
/// println!("{} issues, confidence {}", report.issues().len(), report.encoding_confidence());
///
/// let output = driver.rewrite(ZipAdapter::open("archive.zip")?)?;
/// std::fs::write("fixed.zip", output.archive)?;
/// # Ok::<(), zipmend::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Driver {
    options: ProcessingOptions,
    repairer: Repairer,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the processing options.
    pub fn options(mut self, options: ProcessingOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the candidate encodings used for repair.
    pub fn repairer(mut self, repairer: Repairer) -> Self {
        self.repairer = repairer;
        self
    }

    pub fn processing_options(&self) -> ProcessingOptions {
        self.options
    }

    fn policy(&self) -> EntryPolicy<'_> {
        EntryPolicy::new(self.options, &self.repairer)
    }

    // =========================================================================
    // Diagnosis
    // =========================================================================

    /// Scan every entry and report findings without touching any payload.
    pub fn diagnose<R: Read + Seek>(
        &self,
        mut adapter: ZipAdapter<R>,
    ) -> Result<DiagnosticReport, Error> {
        let policy = self.policy();
        let entries = adapter.entries()?;

        let mut builder = ReportBuilder::new();
        for entry in &entries {
            let decision = policy.diagnose(&entry.name, entry.kind);
            record(&mut builder, decision);
        }

        let report = builder.finish();
        log_summary("diagnose", &report);
        Ok(report)
    }

    /// Convenience: diagnose a ZIP file on disk.
    pub fn diagnose_file<P: AsRef<Path>>(&self, path: P) -> Result<DiagnosticReport, Error> {
        self.diagnose(ZipAdapter::open(path)?)
    }

    /// Convenience: diagnose a ZIP archive held in memory.
    pub fn diagnose_bytes(&self, data: Vec<u8>) -> Result<DiagnosticReport, Error> {
        self.diagnose(ZipAdapter::from_bytes(data)?)
    }

    // =========================================================================
    // Rewrite
    // =========================================================================

    /// Rebuild the archive with clutter dropped and names repaired.
    ///
    /// Decisions for all entries are made first; payloads are only read once
    /// the output layout is known to be consistent. Kept payloads are copied
    /// byte for byte and recompressed with [`crate::adapter::DEFLATE_LEVEL`].
    pub fn rewrite<R: Read + Seek>(
        &self,
        mut adapter: ZipAdapter<R>,
    ) -> Result<RewriteOutput, Error> {
        let policy = self.policy();
        let entries = adapter.entries()?;

        let decisions: Vec<Decision> = entries
            .iter()
            .map(|entry| policy.rewrite(&entry.name, entry.kind))
            .collect();

        let mut builder = ReportBuilder::new();
        let mut plan: Vec<(&ArchiveEntry, String)> = Vec::new();
        let mut seen = HashSet::new();

        for (entry, decision) in entries.iter().zip(decisions) {
            match &decision.disposition {
                Disposition::Keep { path, renamed } => {
                    if !seen.insert(path.clone()) {
                        return Err(Error::DuplicateEntry {
                            entry: path.clone(),
                        });
                    }
                    if *renamed {
                        tracing::debug!(from = entry.path(), to = %path, "renaming entry");
                    }
                    plan.push((entry, path.clone()));
                }
                Disposition::Drop { class } => {
                    tracing::debug!(entry = entry.path(), ?class, "dropping entry");
                }
            }
            record(&mut builder, decision);
        }

        let mut sink = ZipSink::new();
        for (entry, path) in plan {
            if entry.is_dir() {
                sink.add_directory(&path, entry.mode)?;
            } else {
                let data = adapter.read(entry)?;
                sink.add_file(&path, &data, entry.mode)?;
            }
        }
        tracing::debug!(files = sink.files(), "writing central directory");

        let archive = sink.finish()?;
        let report = builder.finish();
        log_summary("rewrite", &report);
        Ok(RewriteOutput { archive, report })
    }

    /// Convenience: rewrite a ZIP file on disk.
    pub fn rewrite_file<P: AsRef<Path>>(&self, path: P) -> Result<RewriteOutput, Error> {
        self.rewrite(ZipAdapter::open(path)?)
    }

    /// Convenience: rewrite a ZIP archive held in memory.
    pub fn rewrite_bytes(&self, data: Vec<u8>) -> Result<RewriteOutput, Error> {
        self.rewrite(ZipAdapter::from_bytes(data)?)
    }

    // =========================================================================
    // Host files
    // =========================================================================

    /// Build an archive from host files, applying settings-file and
    /// hidden-file filtering.
    pub fn pack_files<I, F>(&self, files: I) -> Result<RewriteOutput, Error>
    where
        I: IntoIterator<Item = F>,
        F: Into<HostFile>,
    {
        let policy = self.policy();
        let mut builder = ReportBuilder::new();
        let mut kept: Vec<(String, Vec<u8>)> = Vec::new();
        let mut seen = HashSet::new();

        for file in files {
            let HostFile { path, data } = file.into();
            let path = normalize_host_path(&path)?;
            let decision = policy.pack(&path);

            match &decision.disposition {
                Disposition::Keep { path, .. } => {
                    if !seen.insert(path.clone()) {
                        return Err(Error::DuplicateEntry {
                            entry: path.clone(),
                        });
                    }
                    kept.push((path.clone(), data));
                }
                Disposition::Drop { class } => {
                    tracing::debug!(entry = %path, ?class, "skipping host file");
                }
            }
            record(&mut builder, decision);
        }

        let mut sink = ZipSink::new();
        for (path, data) in &kept {
            sink.add_file(path, data, None)?;
        }

        let archive = sink.finish()?;
        let report = builder.finish();
        log_summary("pack", &report);
        Ok(RewriteOutput { archive, report })
    }
}

/// Fold one decision into the report, preserving encounter order.
fn record(builder: &mut ReportBuilder, decision: Decision) {
    if decision.is_file {
        builder.file_seen();
    }
    for issue in decision.issues {
        builder.push(issue);
    }
}

fn log_summary(operation: &str, report: &DiagnosticReport) {
    tracing::info!(
        operation,
        files = report.total_files(),
        issues = report.issues().len(),
        encoding = report.encoding_issue_count(),
        confidence = report.encoding_confidence(),
        "archive processed"
    );
}

/// Turn a host-relative path into an archive path.
///
/// Backslashes become `/`; leading `./` and `/` are stripped. Empty paths
/// and `..` segments are rejected.
pub fn normalize_host_path(path: &str) -> Result<String, Error> {
    let unified = path.replace('\\', "/");
    let mut trimmed = unified.as_str();
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }

    let invalid = |reason: &str| Error::InvalidPath {
        entry: path.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty path"));
    }
    if trimmed.split('/').any(|seg| seg == "..") {
        return Err(invalid("contains a parent directory segment"));
    }
    Ok(trimmed.to_string())
}
