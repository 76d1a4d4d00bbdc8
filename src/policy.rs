//! Per-entry decisions.
//!
//! Each entry's fate depends only on its own name: the functions here map
//! one entry to its findings and keep/drop outcome, with no shared state.
//! The driver reduces these decisions in encounter order.

use crate::classify::{classify, is_hidden_file, is_settings_file, PathClass};
use crate::entry::{EntryKind, EntryName};
use crate::options::ProcessingOptions;
use crate::repair::Repairer;
use crate::report::DiagnosticIssue;

/// What happens to an entry in the output archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Copy the payload under `path`.
    Keep { path: String, renamed: bool },
    /// Leave the entry out.
    Drop { class: PathClass },
}

/// Findings and outcome for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the entry counts toward `total_files`.
    pub is_file: bool,
    pub issues: Vec<DiagnosticIssue>,
    pub disposition: Disposition,
}

impl Decision {
    fn keep(kind: EntryKind, path: String, renamed: bool, issues: Vec<DiagnosticIssue>) -> Self {
        Self {
            is_file: kind == EntryKind::File,
            issues,
            disposition: Disposition::Keep { path, renamed },
        }
    }

    fn drop(kind: EntryKind, class: PathClass, issues: Vec<DiagnosticIssue>) -> Self {
        Self {
            is_file: kind == EntryKind::File,
            issues,
            disposition: Disposition::Drop { class },
        }
    }
}

/// Classification and repair rules, bound to one set of options.
#[derive(Debug, Clone, Copy)]
pub struct EntryPolicy<'a> {
    options: ProcessingOptions,
    repairer: &'a Repairer,
}

impl<'a> EntryPolicy<'a> {
    pub fn new(options: ProcessingOptions, repairer: &'a Repairer) -> Self {
        Self { options, repairer }
    }

    /// Whether the options drop entries of this class.
    pub fn removes(&self, class: PathClass) -> bool {
        match class {
            PathClass::MetadataArtifact => self.options.remove_metadata_artifacts,
            PathClass::SettingsFile => self.options.remove_settings_files,
            PathClass::HiddenFile => self.options.remove_hidden_files,
        }
    }

    // ========================================================================
    // Diagnosis (read-only)
    // ========================================================================

    /// Findings for an entry, ignoring the removal switches.
    ///
    /// Metadata artifacts and settings files stop here. Hidden files are
    /// reported and still have their encoding checked.
    pub fn diagnose(&self, name: &EntryName, kind: EntryKind) -> Decision {
        let path = name.as_str();
        let keep_as_is = |issues| Decision::keep(kind, path.to_string(), false, issues);

        if kind == EntryKind::Directory {
            return keep_as_is(Vec::new());
        }

        let mut issues = Vec::new();
        if let Some(class) = classify(path) {
            issues.push(DiagnosticIssue::classified(class, path));
            if class.short_circuits() {
                return keep_as_is(issues);
            }
        }

        let repair = self.repairer.repair_name(name);
        if repair.was_fixed {
            issues.push(DiagnosticIssue::encoding_fixed(
                path,
                &repair.fixed,
                repair.encoding,
            ));
        }
        keep_as_is(issues)
    }

    // ========================================================================
    // Rewrite
    // ========================================================================

    /// Findings and keep/drop outcome for an entry of a source archive.
    ///
    /// Directories are never reported, but follow the same drop rules and are
    /// renamed silently so repaired children land in repaired folders.
    pub fn rewrite(&self, name: &EntryName, kind: EntryKind) -> Decision {
        let path = name.as_str();
        let is_dir = kind == EntryKind::Directory;
        let mut issues = Vec::new();

        if let Some(class) = classify(path) {
            if !is_dir {
                issues.push(DiagnosticIssue::classified(class, path));
            }
            if self.removes(class) {
                return Decision::drop(kind, class, issues);
            }
        }

        let repair = self.repairer.repair_name(name);
        if !repair.was_fixed {
            return Decision::keep(kind, path.to_string(), false, issues);
        }

        if self.options.fix_encoding {
            if !is_dir {
                issues.push(DiagnosticIssue::encoding_fixed(
                    path,
                    &repair.fixed,
                    repair.encoding,
                ));
            }
            Decision::keep(kind, repair.fixed, true, issues)
        } else {
            if !is_dir {
                issues.push(DiagnosticIssue::encoding_detected(path, repair.encoding));
            }
            Decision::keep(kind, path.to_string(), false, issues)
        }
    }

    // ========================================================================
    // Host files
    // ========================================================================

    /// Outcome for a host file. Host names are already Unicode and never
    /// carry metadata folders, so only settings and hidden files apply.
    pub fn pack(&self, path: &str) -> Decision {
        let class = if is_settings_file(path) {
            Some(PathClass::SettingsFile)
        } else if is_hidden_file(path) {
            Some(PathClass::HiddenFile)
        } else {
            None
        };

        let Some(class) = class else {
            return Decision::keep(EntryKind::File, path.to_string(), false, Vec::new());
        };

        let issues = vec![DiagnosticIssue::classified(class, path)];
        if self.removes(class) {
            Decision::drop(EntryKind::File, class, issues)
        } else {
            Decision::keep(EntryKind::File, path.to_string(), false, issues)
        }
    }
}
