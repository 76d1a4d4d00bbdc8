//! zipmend CLI - repair legacy-encoded ZIP filenames
//!
//! # Examples
//!
//! ```bash
//! # Report problems without writing anything
//! zipmend archive.zip --check
//!
//! # Rewrite to archive.fixed.zip
//! zipmend archive.zip
//!
//! # Choose the output, also drop dotfiles
//! zipmend archive.zip -o clean.zip --remove-hidden
//!
//! # Try Japanese before Korean
//! zipmend archive.zip --encoding shift_jis --encoding euc-kr
//!
//! # Pack a directory, skipping .DS_Store
//! zipmend ./photos -o photos.zip
//!
//! # Generate shell completions
//! zipmend --completions bash > ~/.bash_completion.d/zipmend
//! ```

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;
use zipmend::{
    DiagnosticReport, Driver, Error, HostFile, IssueKind, ProcessingOptions, Repairer,
    ZipAdapter,
};

#[derive(Parser)]
#[command(
    name = "zipmend",
    about = "Repair garbled legacy-encoded filenames in ZIP archives",
    version,
    after_help = "EXAMPLES:
    zipmend archive.zip --check
    zipmend archive.zip -o fixed.zip
    zipmend archive.zip --encoding shift_jis
    zipmend ./folder -o folder.zip"
)]
struct Cli {
    /// ZIP archive to repair, or a directory to pack
    #[arg(required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Output archive (default: <input>.fixed.zip, or <dir>.zip for directories)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Diagnose only; exit with status 2 if issues were found
    #[arg(short, long)]
    check: bool,

    /// List entry names with their repaired form
    #[arg(short, long)]
    list: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Keep __MACOSX/ metadata entries
    #[arg(long)]
    keep_macosx: bool,

    /// Keep .DS_Store files
    #[arg(long)]
    keep_ds_store: bool,

    /// Drop dotfiles and dot-directories
    #[arg(long)]
    remove_hidden: bool,

    /// Report encoding problems but keep the original names
    #[arg(long)]
    no_fix_encoding: bool,

    /// Candidate encoding, in priority order (can be repeated; default: euc-kr, shift_jis, gbk)
    #[arg(short, long = "encoding", value_name = "LABEL")]
    encodings: Vec<String>,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum)]
    completions: Option<Shell>,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,

    /// More logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ProcessingOptions {
        ProcessingOptions::default()
            .remove_metadata_artifacts(!self.keep_macosx)
            .remove_settings_files(!self.keep_ds_store)
            .remove_hidden_files(self.remove_hidden)
            .fix_encoding(!self.no_fix_encoding)
    }

    fn repairer(&self) -> Result<Repairer, Error> {
        if self.encodings.is_empty() {
            Ok(Repairer::default())
        } else {
            Repairer::from_labels(&self.encodings)
        }
    }

    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zipmend={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle completions generation
    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "zipmend", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.log_level());

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let Some(input) = cli.input.as_deref() else {
        return Ok(ExitCode::FAILURE);
    };
    let driver = Driver::new()
        .options(cli.options())
        .repairer(cli.repairer()?);

    if input.is_dir() {
        return pack_directory(cli, &driver, input);
    }

    if cli.list {
        list_archive(cli, input)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.check {
        let report = driver.diagnose_file(input)?;
        print_report(cli, &report)?;
        return Ok(if report.has_issues() {
            ExitCode::from(2)
        } else {
            ExitCode::SUCCESS
        });
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(input));
    if output_path == input {
        return Err(Error::InvalidPath {
            entry: output_path.display().to_string(),
            reason: "output would overwrite the input archive".to_string(),
        });
    }

    let output = driver.rewrite_file(input)?;
    std::fs::write(&output_path, &output.archive)?;

    print_report(cli, &output.report)?;
    if !cli.quiet && !cli.json {
        println!("Wrote {}", output_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// `archive.zip` -> `archive.fixed.zip`
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    input.with_file_name(format!("{}.fixed.zip", stem))
}

fn pack_directory(cli: &Cli, driver: &Driver, dir: &Path) -> Result<ExitCode, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io(io::Error::other(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| Error::InvalidPath {
                entry: entry.path().display().to_string(),
                reason: e.to_string(),
            })?;
        let data = std::fs::read(entry.path())?;
        files.push(HostFile::new(relative.to_string_lossy(), data));
    }

    let output = driver.pack_files(files)?;
    if cli.check {
        print_report(cli, &output.report)?;
        return Ok(ExitCode::SUCCESS);
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| dir.with_extension("zip"));
    std::fs::write(&output_path, &output.archive)?;

    print_report(cli, &output.report)?;
    if !cli.quiet && !cli.json {
        println!("Wrote {}", output_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn list_archive(cli: &Cli, path: &Path) -> Result<(), Error> {
    let repairer = cli.repairer()?;
    let mut adapter = ZipAdapter::open(path)?;
    let entries = adapter.entries()?;

    if !cli.quiet {
        println!("{} entries in {}:", entries.len(), path.display());
        println!();
    }

    for entry in &entries {
        let repair = repairer.repair_name(&entry.name);
        if repair.was_fixed {
            println!(
                "{}  ->  {}  [{}]",
                entry.path(),
                repair.fixed,
                repair.encoding.unwrap_or("?")
            );
        } else {
            println!("{}", entry.path());
        }
    }
    Ok(())
}

fn print_report(cli: &Cli, report: &DiagnosticReport) -> Result<(), Error> {
    if cli.json {
        let json = serde_json::to_string_pretty(report).map_err(|e| Error::Io(e.into()))?;
        println!("{}", json);
        return Ok(());
    }
    if cli.quiet {
        return Ok(());
    }

    for issue in report.issues() {
        let label = match issue.kind {
            IssueKind::Encoding => "encoding",
            IssueKind::MetadataArtifact => "macosx",
            IssueKind::SettingsFile => "ds_store",
            IssueKind::HiddenFile => "hidden",
        };
        match &issue.fixed_path {
            Some(fixed) => println!("{:>9}  {}  ->  {}", label, issue.original_path, fixed),
            None => println!("{:>9}  {}  ({})", label, issue.original_path, issue.description),
        }
    }

    println!();
    println!(
        "{} files: {} encoding, {} __MACOSX, {} .DS_Store, {} hidden (confidence {}%)",
        report.total_files(),
        report.encoding_issue_count(),
        report.metadata_artifact_count(),
        report.settings_file_count(),
        report.hidden_file_count(),
        report.encoding_confidence()
    );
    Ok(())
}

fn format_error(e: &Error) -> String {
    match e {
        Error::Zip(inner) => format!("Not a readable ZIP archive: {}", inner),
        Error::UnknownEncoding { label } => {
            format!(
                "Unknown encoding '{}' (try euc-kr, shift_jis, gbk, big5)",
                label
            )
        }
        Error::DuplicateEntry { entry } => {
            format!("Two entries would both be written as '{}'", entry)
        }
        _ => e.to_string(),
    }
}
