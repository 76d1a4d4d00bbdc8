//! Async API (requires the `async` feature).
//!
//! The `zip` crate is synchronous, so each operation runs on tokio's blocking
//! thread pool via [`tokio::task::spawn_blocking`]. Classification and repair
//! never suspend; only the container read and the final encode do real I/O.
//!
//! # Example
//!
//! ```no_run
//! use zipmend::r#async::{diagnose_file, AsyncDriver};
//! use zipmend::ProcessingOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zipmend::Error> {
//!     let report = diagnose_file("archive.zip").await?;
//!     println!("{} issues", report.issues().len());
//!
//!     let output = AsyncDriver::new()
//!         .options(ProcessingOptions::default().remove_hidden_files(true))
//!         .rewrite_file("archive.zip")
//!         .await?;
//!     tokio::fs::write("fixed.zip", output.archive).await?;
//!     Ok(())
//! }
//! ```

use crate::{DiagnosticReport, Driver, Error, HostFile, ProcessingOptions, Repairer, RewriteOutput};
use std::path::Path;
use tokio::task::spawn_blocking;

/// Async wrapper around [`Driver`] with the same configuration surface.
#[derive(Debug, Clone, Default)]
pub struct AsyncDriver {
    driver: Driver,
}

impl AsyncDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the processing options.
    pub fn options(mut self, options: ProcessingOptions) -> Self {
        self.driver = self.driver.options(options);
        self
    }

    /// Set the candidate encodings used for repair.
    pub fn repairer(mut self, repairer: Repairer) -> Self {
        self.driver = self.driver.repairer(repairer);
        self
    }

    /// Diagnose a ZIP file asynchronously.
    pub async fn diagnose_file<P: AsRef<Path>>(&self, path: P) -> Result<DiagnosticReport, Error> {
        let driver = self.driver.clone();
        let path = path.as_ref().to_path_buf();

        spawn_blocking(move || driver.diagnose_file(path))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }

    /// Diagnose a ZIP held in memory asynchronously.
    pub async fn diagnose_bytes(&self, data: Vec<u8>) -> Result<DiagnosticReport, Error> {
        let driver = self.driver.clone();

        spawn_blocking(move || driver.diagnose_bytes(data))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }

    /// Rewrite a ZIP file asynchronously.
    pub async fn rewrite_file<P: AsRef<Path>>(&self, path: P) -> Result<RewriteOutput, Error> {
        let driver = self.driver.clone();
        let path = path.as_ref().to_path_buf();

        spawn_blocking(move || driver.rewrite_file(path))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }

    /// Rewrite a ZIP held in memory asynchronously.
    pub async fn rewrite_bytes(&self, data: Vec<u8>) -> Result<RewriteOutput, Error> {
        let driver = self.driver.clone();

        spawn_blocking(move || driver.rewrite_bytes(data))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }

    /// Build an archive from host files asynchronously.
    pub async fn pack_files(&self, files: Vec<HostFile>) -> Result<RewriteOutput, Error> {
        let driver = self.driver.clone();

        spawn_blocking(move || driver.pack_files(files))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Diagnose a ZIP file asynchronously with default settings.
pub async fn diagnose_file<P: AsRef<Path>>(path: P) -> Result<DiagnosticReport, Error> {
    AsyncDriver::new().diagnose_file(path).await
}

/// Diagnose a ZIP from bytes asynchronously with default settings.
pub async fn diagnose_bytes(data: Vec<u8>) -> Result<DiagnosticReport, Error> {
    AsyncDriver::new().diagnose_bytes(data).await
}

/// Rewrite a ZIP file asynchronously with the given options.
pub async fn rewrite_file<P: AsRef<Path>>(
    path: P,
    options: ProcessingOptions,
) -> Result<RewriteOutput, Error> {
    AsyncDriver::new().options(options).rewrite_file(path).await
}

/// Rewrite a ZIP from bytes asynchronously with the given options.
pub async fn rewrite_bytes(
    data: Vec<u8>,
    options: ProcessingOptions,
) -> Result<RewriteOutput, Error> {
    AsyncDriver::new().options(options).rewrite_bytes(data).await
}

/// Build an archive from host files asynchronously with the given options.
pub async fn pack_files(
    files: Vec<HostFile>,
    options: ProcessingOptions,
) -> Result<RewriteOutput, Error> {
    AsyncDriver::new().options(options).pack_files(files).await
}
