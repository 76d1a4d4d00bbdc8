//! Repair ZIP archives whose entry names were written in a legacy East-Asian
//! codepage, and strip macOS clutter (`__MACOSX/`, `.DS_Store`, dotfiles).
//!
//! Diagnose first, then rewrite:
//!
//! ```no_run
//! let report = zipmend::diagnose_file("archive.zip")?;
//! for issue in report.issues() {
//!     println!("{:?}: {}", issue.kind, issue.original_path);
//! }
//!
//! let output = zipmend::rewrite_file("archive.zip")?;
//! std::fs::write("archive.fixed.zip", output.archive)?;
//! # Ok::<(), zipmend::Error>(())
//! ```

mod adapter;
pub mod classify;
pub mod detect;
mod driver;
pub mod entry;
mod error;
mod options;
pub mod policy;
pub mod repair;
pub mod report;

#[cfg(feature = "async")]
#[path = "async_driver.rs"]
pub mod r#async;

pub use adapter::{ZipAdapter, ZipSink, DEFLATE_LEVEL};
pub use driver::{normalize_host_path, Driver, HostFile, RewriteOutput};
pub use entry::{ArchiveEntry, EntryKind, EntryName};
pub use error::Error;
pub use options::ProcessingOptions;
pub use repair::{repair, Candidate, Repair, Repairer};
pub use report::{DiagnosticIssue, DiagnosticReport, IssueKind};

/// Diagnose a ZIP file with the default candidate order.
pub fn diagnose_file<P: AsRef<std::path::Path>>(path: P) -> Result<DiagnosticReport, Error> {
    Driver::new().diagnose_file(path)
}

/// Diagnose an in-memory ZIP archive with the default candidate order.
pub fn diagnose_bytes(data: Vec<u8>) -> Result<DiagnosticReport, Error> {
    Driver::new().diagnose_bytes(data)
}

/// Rewrite a ZIP file with default options.
pub fn rewrite_file<P: AsRef<std::path::Path>>(path: P) -> Result<RewriteOutput, Error> {
    Driver::new().rewrite_file(path)
}

/// Rewrite an in-memory ZIP archive with the given options.
pub fn rewrite_bytes(data: Vec<u8>, options: ProcessingOptions) -> Result<RewriteOutput, Error> {
    Driver::new().options(options).rewrite_bytes(data)
}

/// Build an archive from host files with the given options.
pub fn pack_files<I, F>(files: I, options: ProcessingOptions) -> Result<RewriteOutput, Error>
where
    I: IntoIterator<Item = F>,
    F: Into<HostFile>,
{
    Driver::new().options(options).pack_files(files)
}
