//! Reader for the `Name = arg, arg, ...` file format
//!
//! # Format
//!
//! ```text
//! # comment
//! Decay Rate A = half-life, 5, m
//! Initial Count A = 1000,
//! ```
//!
//! - All whitespace is removed before anything else, so `Decay Rate A` and
//!   `decayratea` are the same name.
//! - Names are case-insensitive. Values are lower-cased unless the entry is listed as
//!   case-preserving (file names).
//! - Empty lines and lines starting with `#` are skipped.
//! - Every other line must contain exactly one `=`.

use std::fs;
use std::path::Path;

use crate::config::units::{CountUnit, RatioUnit, TimeUnit};
use crate::error::DecayError;

/// One `Name = args` line
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// 1-based line number
    pub line: usize,

    /// Normalised name (no whitespace, lower case)
    pub name: String,

    /// Comma-separated arguments, whitespace removed
    pub args: Vec<String>,
}

/// Parsed key-value file
#[derive(Debug, Clone)]
pub struct KeyValueFile {
    source_name: String,
    entries: Vec<Entry>,
}

/// Normalise a display name such as `"Decay Rate A"` to its lookup form `"decayratea"`
pub fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_lowercase()
}

impl KeyValueFile {
    /// Parse `text`
    ///
    /// `source_name` appears in error messages (`"input"`, `"settings"`).
    /// Values of entries named in `preserve_case` keep their case.
    pub fn parse(text: &str, source_name: &str, preserve_case: &[&str]) -> Result<Self, DecayError> {
        let preserved: Vec<String> = preserve_case.iter().map(|n| normalize(n)).collect();
        let mut entries: Vec<Entry> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let compact: String = raw.split_whitespace().collect();

            if compact.is_empty() || compact.starts_with('#') {
                continue;
            }

            let Some((name, value)) = compact.split_once('=') else {
                return Err(DecayError::config(source_name, line, "expected a line of the form \"Name = arguments\""));
            };
            if value.contains('=') {
                return Err(DecayError::config(source_name, line, "expected exactly one \"=\""));
            }

            let name = name.to_lowercase();
            if entries.iter().any(|e| e.name == name) {
                return Err(DecayError::config(source_name, line, format!("duplicate entry \"{}\"", name)));
            }

            let value = if preserved.contains(&name) {
                value.to_string()
            } else {
                value.to_lowercase()
            };

            entries.push(Entry {
                line,
                name,
                args: value.split(',').map(str::to_string).collect(),
            });
        }

        Ok(Self {
            source_name: source_name.to_string(),
            entries,
        })
    }

    /// Read and parse the file at `path`
    pub fn load(path: &Path, source_name: &str, preserve_case: &[&str]) -> Result<Self, DecayError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, source_name, preserve_case)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry for the display name `name`, if present
    pub fn get(&self, name: &str) -> Option<&Entry> {
        let key = normalize(name);
        self.entries.iter().find(|e| e.name == key)
    }

    /// Entry for `name` with exactly `arg_count` arguments (`None`: any number)
    pub fn require(&self, name: &str, arg_count: Option<usize>) -> Result<&Entry, DecayError> {
        let entry = self.get(name).ok_or_else(|| DecayError::MissingEntry {
            source_name: self.source_name.clone(),
            key: format!("{} =", name),
        })?;

        if let Some(count) = arg_count
            && entry.args.len() != count
        {
            return Err(self.error(
                entry,
                format!(
                    "expected \"{} =\" followed by {} comma separated arguments",
                    name, count
                ),
            ));
        }

        Ok(entry)
    }

    /// Reject names not listed in `known`
    pub fn reject_unknown(&self, known: &[&str]) -> Result<(), DecayError> {
        let known: Vec<String> = known.iter().map(|n| normalize(n)).collect();
        match self.entries.iter().find(|e| !known.contains(&e.name)) {
            Some(entry) => Err(self.error(entry, format!("unexpected entry \"{}\"", entry.name))),
            None => Ok(()),
        }
    }

    /// Configuration error located at `entry`
    pub fn error(&self, entry: &Entry, message: impl Into<String>) -> DecayError {
        DecayError::config(&self.source_name, entry.line, message)
    }

    // =============================================================================================
    // Typed arguments
    // =============================================================================================

    /// Argument `index` (0-based) as a float
    pub fn float(&self, entry: &Entry, index: usize) -> Result<f64, DecayError> {
        entry.args[index].parse::<f64>().map_err(|_| {
            self.error(
                entry,
                format!(
                    "expected a float as a decimal or in scientific notation as argument number {}",
                    index + 1
                ),
            )
        })
    }

    /// Argument `index` as a time unit
    pub fn time_unit(&self, entry: &Entry, index: usize) -> Result<TimeUnit, DecayError> {
        TimeUnit::parse(&entry.args[index]).ok_or_else(|| {
            self.error(
                entry,
                format!(
                    "expected a unit in {:?} as argument number {}",
                    TimeUnit::SYMBOLS,
                    index + 1
                ),
            )
        })
    }

    /// Argument `index` as a count unit
    pub fn count_unit(&self, entry: &Entry, index: usize) -> Result<CountUnit, DecayError> {
        CountUnit::parse(&entry.args[index]).ok_or_else(|| {
            self.error(
                entry,
                format!(
                    "expected a unit in {:?} as argument number {}",
                    CountUnit::SYMBOLS,
                    index + 1
                ),
            )
        })
    }

    /// Argument `index` as a ratio unit
    pub fn ratio_unit(&self, entry: &Entry, index: usize) -> Result<RatioUnit, DecayError> {
        RatioUnit::parse(&entry.args[index]).ok_or_else(|| {
            self.error(
                entry,
                format!(
                    "expected a unit in {:?} as argument number {}",
                    RatioUnit::SYMBOLS,
                    index + 1
                ),
            )
        })
    }

    /// First argument as `true`/`t`/`false`/`f`
    pub fn truth(&self, entry: &Entry) -> Result<bool, DecayError> {
        match entry.args[0].as_str() {
            "true" | "t" => Ok(true),
            "false" | "f" => Ok(false),
            _ => Err(self.error(entry, "expected \"True\" or \"False\"")),
        }
    }

    /// Argument `index` as a non-negative integer written with digits only
    pub fn digits(&self, entry: &Entry, index: usize) -> Result<usize, DecayError> {
        let arg = &entry.args[index];
        if arg.is_empty() || !arg.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.error(entry, "expected only digits"));
        }
        arg.parse::<usize>()
            .map_err(|_| self.error(entry, format!("number {} is too large", arg)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
