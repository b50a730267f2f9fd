// src/sources.rs - deciding which log files get scanned
use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::error::ArgumentError;

/// Logs that are always searched
pub const DEFAULT_LOG_FILES: &[&str] = &["/var/log/syslog", "/var/log/kern.log", "/var/log/auth.log"];

/// An opened, readable log file
#[derive(Debug)]
pub struct Source {
    /// The path as given, used in output
    pub id: String,
    file: File,
}

impl Source {
    pub fn into_reader(self, capacity: usize) -> BufReader<File> {
        BufReader::with_capacity(capacity, self.file)
    }
}

/// Why a candidate path is not scanned
#[derive(Debug)]
pub enum SkipReason {
    NotFound,
    IsDirectory,
    NotRegularFile,
    PermissionDenied,
    Unreadable(io::Error),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::IsDirectory => write!(f, "is a directory"),
            SkipReason::NotRegularFile => write!(f, "not a regular file"),
            SkipReason::PermissionDenied => write!(f, "permission denied"),
            SkipReason::Unreadable(err) => write!(f, "{}", err),
        }
    }
}

#[derive(Debug)]
pub struct SkippedSource {
    pub path: String,
    pub reason: SkipReason,
    /// Named on the command line rather than one of the default logs
    pub explicit: bool,
}

/// Result of source resolution: what will be scanned, in order, and what was skipped
#[derive(Debug, Default)]
pub struct SourceSet {
    pub sources: Vec<Source>,
    pub skipped: Vec<SkippedSource>,
}

/// Open the default logs followed by the explicitly named ones.
///
/// A missing explicit path fails the whole resolution before anything is
/// opened. Everything else that can't be read is recorded in `skipped`.
/// Paths resolving to the same file are only opened once.
pub fn resolve_sources<P: AsRef<Path>>(
    defaults: &[P],
    explicit: &[P],
) -> Result<SourceSet, ArgumentError> {
    for path in explicit {
        let path: &Path = path.as_ref();
        if fs::symlink_metadata(path).is_err() {
            return Err(ArgumentError::MissingFile(path.to_path_buf()));
        }
    }

    let mut set = SourceSet::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let defaults = defaults.iter().map(|p| (AsRef::<Path>::as_ref(p), false));
    let explicit = explicit.iter().map(|p| (AsRef::<Path>::as_ref(p), true));

    for (path, is_explicit) in defaults.chain(explicit) {
        let id = path.display().to_string();
        match open_source(path, is_explicit) {
            Ok(file) => {
                let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                if !seen.insert(key) {
                    tracing::debug!(path = %id, "duplicate source ignored");
                    continue;
                }
                set.sources.push(Source { id, file });
            }
            Err(reason) => {
                tracing::debug!(path = %id, reason = %reason, "source skipped");
                set.skipped.push(SkippedSource {
                    path: id,
                    reason,
                    explicit: is_explicit,
                });
            }
        }
    }

    Ok(set)
}

fn open_source(path: &Path, is_explicit: bool) -> Result<File, SkipReason> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !is_explicit => {
            return Err(SkipReason::NotFound)
        }
        Err(err) => return Err(classify(err)),
    };

    if metadata.is_dir() {
        return Err(SkipReason::IsDirectory);
    }
    if !metadata.is_file() {
        return Err(SkipReason::NotRegularFile);
    }

    File::open(path).map_err(classify)
}

fn classify(err: io::Error) -> SkipReason {
    match err.kind() {
        io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
        io::ErrorKind::NotFound => SkipReason::NotFound,
        _ => SkipReason::Unreadable(err),
    }
}
