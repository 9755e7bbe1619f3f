//! User-facing translation log
//!
//! One entry per leaf handled by the [`StringTranslator`](crate::mt::StringTranslator),
//! rendered as `<status:> <source> -> <result>` with an optional
//! parenthesised detail. Per-status counts are always kept; entries are
//! only printed to stdout and retained when the log is enabled.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    Success,
    /// Non-fatal: cache hits, surplus candidates
    Warning,
    /// Provider failures; the source text was kept
    Error,
}

impl LogStatus {
    fn prefix(self) -> &'static str {
        match self {
            LogStatus::Success => "",
            LogStatus::Warning => "warning: ",
            LogStatus::Error => "error: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub status: LogStatus,
    pub source: String,
    pub result: String,
    pub detail: Option<String>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} -> {}", self.status.prefix(), self.source, self.result)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TranslationLog {
    enabled: bool,
    entries: Vec<LogEntry>,
    successes: usize,
    warnings: usize,
    errors: usize,
}

impl TranslationLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn record(
        &mut self,
        status: LogStatus,
        source: &str,
        result: &str,
        detail: Option<String>,
    ) {
        match status {
            LogStatus::Success => self.successes += 1,
            LogStatus::Warning => self.warnings += 1,
            LogStatus::Error => self.errors += 1,
        }
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            status,
            source: source.to_string(),
            result: result.to_string(),
            detail,
        };
        println!("{}", entry);
        self.entries.push(entry);
    }

    /// Entries printed so far, empty when the log is disabled
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn count(&self, status: LogStatus) -> usize {
        match status {
            LogStatus::Success => self.successes,
            LogStatus::Warning => self.warnings,
            LogStatus::Error => self.errors,
        }
    }
}
