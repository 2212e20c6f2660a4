//! Directory listing and name filtering for folder-search.
//!
//! [list] reads exactly one directory level and keeps the child directories that
//! survive the filter rules held in [SearchOptions]:
//! - only directories (symlinks are not followed, so they never count)
//! - never anything starting with `.git`
//! - never a name listed in the ignore set (exact match)
//! - the name contains the search pattern, case folded unless case sensitive
//!
//! Failures are reported through [ScanResult], never by panicking.

use crate::error::ScanError;

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Names starting with this prefix are always hidden.
const GIT_PREFIX: &str = ".git";

/// Default ignore set used when the config does not provide one.
pub const DEFAULT_IGNORE: &[&str] = &["node_modules"];

/// Filter options for one scan.
///
/// Shared between the controller and the worker behind an `Arc` and never
/// mutated in place: changing the filter means building a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pattern: String,
    case_sensitive: bool,
    ignore_names: HashSet<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            case_sensitive: false,
            ignore_names: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SearchOptions {
    pub fn new<I, S>(pattern: impl Into<String>, case_sensitive: bool, ignore_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            case_sensitive,
            ignore_names: ignore_names.into_iter().map(Into::into).collect(),
        }
    }

    // Getters

    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn ignore_names(&self) -> &HashSet<String> {
        &self.ignore_names
    }

    /// Copy of these options with a different pattern.
    pub fn with_pattern(&self, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..self.clone()
        }
    }

    /// Copy of these options with a different case sensitivity.
    pub fn with_case_sensitive(&self, case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            ..self.clone()
        }
    }

    fn matcher(&self) -> NameMatcher<'_> {
        let pattern = if self.case_sensitive {
            Cow::Borrowed(self.pattern.as_str())
        } else {
            Cow::Owned(self.pattern.to_lowercase())
        };
        NameMatcher {
            pattern,
            options: self,
        }
    }
}

/// Per scan matcher, the pattern is folded once instead of once per entry.
struct NameMatcher<'a> {
    pattern: Cow<'a, str>,
    options: &'a SearchOptions,
}

impl NameMatcher<'_> {
    fn keep(&self, name: &str) -> bool {
        if name.starts_with(GIT_PREFIX) || self.options.ignore_names.contains(name) {
            return false;
        }
        if self.pattern.is_empty() {
            return true;
        }
        if self.options.case_sensitive {
            name.contains(self.pattern.as_ref())
        } else {
            name.to_lowercase().contains(self.pattern.as_ref())
        }
    }
}

/// Outcome of one directory scan.
///
/// Either entries with no error, or no entries and an error. Never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    entries: Vec<String>,
    error: Option<ScanError>,
}

impl ScanResult {
    pub fn ok(entries: Vec<String>) -> Self {
        Self {
            entries,
            error: None,
        }
    }

    pub fn failed(error: ScanError) -> Self {
        Self {
            entries: Vec::new(),
            error: Some(error),
        }
    }

    #[inline]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[inline]
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<String>, ScanError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.entries),
        }
    }
}

/// Lists the immediate child directories of `path` that pass `options`.
///
/// Entries come back sorted by name. An unreadable directory, or an entry whose
/// type cannot be read, fails the whole scan.
pub fn list(path: &Path, options: &SearchOptions) -> ScanResult {
    let read = match fs::read_dir(path) {
        Ok(read) => read,
        Err(e) => return ScanResult::failed(ScanError::from_io(path, e)),
    };

    let matcher = options.matcher();
    let mut entries = Vec::new();

    for entry in read {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => return ScanResult::failed(ScanError::from_io(path, e)),
        };

        // file_type() does not follow symlinks
        match entry_is_dir(&entry.path(), entry.file_type()) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => return ScanResult::failed(e),
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if matcher.keep(&name) {
            entries.push(name.into_owned());
        }
    }
    entries.sort_unstable();
    ScanResult::ok(entries)
}

fn entry_is_dir(path: &Path, file_type: io::Result<fs::FileType>) -> Result<bool, ScanError> {
    file_type
        .map(|ft| ft.is_dir())
        .map_err(|e| ScanError::from_io(path, e))
}
