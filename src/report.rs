//! Diagnostic reports.
//!
//! A report is assembled in one ordered pass and frozen: counters are
//! derived from the issue list at construction and cannot drift from it.

use serde::Serialize;

use crate::classify::PathClass;

/// Why an entry was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    Encoding,
    MetadataArtifact,
    SettingsFile,
    HiddenFile,
}

impl From<PathClass> for IssueKind {
    fn from(class: PathClass) -> Self {
        match class {
            PathClass::MetadataArtifact => Self::MetadataArtifact,
            PathClass::SettingsFile => Self::SettingsFile,
            PathClass::HiddenFile => Self::HiddenFile,
        }
    }
}

/// One (entry, reason) finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticIssue {
    pub kind: IssueKind,
    pub original_path: String,
    /// Present only for encoding issues whose repair was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_path: Option<String>,
    pub description: String,
}

impl DiagnosticIssue {
    /// A clutter finding for `class`.
    pub fn classified(class: PathClass, path: &str) -> Self {
        let description = match class {
            PathClass::MetadataArtifact => "macOS resource-fork metadata entry",
            PathClass::SettingsFile => "macOS folder settings file",
            PathClass::HiddenFile => "hidden file",
        };
        Self {
            kind: class.into(),
            original_path: path.to_string(),
            fixed_path: None,
            description: description.to_string(),
        }
    }

    /// A repaired filename.
    pub fn encoding_fixed(path: &str, fixed: &str, encoding: Option<&str>) -> Self {
        Self {
            kind: IssueKind::Encoding,
            original_path: path.to_string(),
            fixed_path: Some(fixed.to_string()),
            description: match encoding {
                Some(name) => format!("filename was encoded as {}", name),
                None => "filename was encoded with a legacy codepage".to_string(),
            },
        }
    }

    /// A repairable filename left as-is because renaming was disabled.
    pub fn encoding_detected(path: &str, encoding: Option<&str>) -> Self {
        Self {
            kind: IssueKind::Encoding,
            original_path: path.to_string(),
            fixed_path: None,
            description: format!(
                "filename looks {}-encoded; renaming disabled",
                encoding.unwrap_or("legacy")
            ),
        }
    }
}

/// Findings for one archive, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    total_files: usize,
    issues: Vec<DiagnosticIssue>,
    metadata_artifact_count: usize,
    settings_file_count: usize,
    encoding_issue_count: usize,
    hidden_file_count: usize,
    encoding_confidence: u8,
}

impl DiagnosticReport {
    /// Number of non-directory entries seen.
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn issues(&self) -> &[DiagnosticIssue] {
        &self.issues
    }

    pub fn metadata_artifact_count(&self) -> usize {
        self.metadata_artifact_count
    }

    pub fn settings_file_count(&self) -> usize {
        self.settings_file_count
    }

    pub fn encoding_issue_count(&self) -> usize {
        self.encoding_issue_count
    }

    pub fn hidden_file_count(&self) -> usize {
        self.hidden_file_count
    }

    /// Heuristic 0-100 score; see [`encoding_confidence`].
    pub fn encoding_confidence(&self) -> u8 {
        self.encoding_confidence
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}

/// Score how likely an archive's issues come from a cross-platform
/// encoding mismatch.
///
/// This is a heuristic prior, not a statistical estimate: 40 points for any
/// macOS clutter (a platform-of-origin signal), plus 15 per encoding issue
/// capped at 60, clamped to 0..=100.
pub fn encoding_confidence(
    metadata_artifacts: usize,
    settings_files: usize,
    encoding_issues: usize,
) -> u8 {
    let mut score: usize = 0;
    if metadata_artifacts > 0 || settings_files > 0 {
        score += 40;
    }
    score += encoding_issues.saturating_mul(15).min(60);
    score.min(100) as u8
}

/// Ordered accumulator for a single operation. Consumed by [`Self::finish`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    total_files: usize,
    issues: Vec<DiagnosticIssue>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one non-directory entry.
    pub fn file_seen(&mut self) {
        self.total_files += 1;
    }

    pub fn push(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    pub fn finish(self) -> DiagnosticReport {
        let mut report = DiagnosticReport {
            total_files: self.total_files,
            issues: self.issues,
            metadata_artifact_count: 0,
            settings_file_count: 0,
            encoding_issue_count: 0,
            hidden_file_count: 0,
            encoding_confidence: 0,
        };
        for issue in &report.issues {
            match issue.kind {
                IssueKind::Encoding => report.encoding_issue_count += 1,
                IssueKind::MetadataArtifact => report.metadata_artifact_count += 1,
                IssueKind::SettingsFile => report.settings_file_count += 1,
                IssueKind::HiddenFile => report.hidden_file_count += 1,
            }
        }
        report.encoding_confidence = encoding_confidence(
            report.metadata_artifact_count,
            report.settings_file_count,
            report.encoding_issue_count,
        );
        report
    }
}
