//! Parse options and process-wide configuration
//!
//! Message precedence, first match wins:
//!
//! 1. the check's own message (or the node's, for structural issues)
//! 2. [`ParseOptions::with_error`] for the current parse
//! 3. the global [`Config`] error map
//! 4. the built-in English locale
//!
//! The global configuration is meant to be installed once at startup.
//! Reconfiguring while parses are in flight is sound but the in-flight
//! parses may observe either configuration.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::foundation::{ErrorMap, PendingIssue};

// ============================================================================
// PARSE OPTIONS
// ============================================================================

/// Per-call options for `safe_parse_with` and friends.
#[derive(Clone)]
pub struct ParseOptions {
    pub(crate) error: Option<ErrorMap>,
    pub(crate) report_input: bool,
    pub(crate) concurrent: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error: None,
            report_input: false,
            concurrent: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an error map for this parse only.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&PendingIssue<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(f));
        self
    }

    /// Attaches the offending input to every issue.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_report_input(mut self, report_input: bool) -> Self {
        self.report_input = report_input;
        self
    }

    /// Lets async parses evaluate independent branches concurrently.
    /// Issue order is canonical either way.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Returns true if issues carry their input.
    #[must_use]
    pub fn report_input(&self) -> bool {
        self.report_input
    }

    /// Returns true if async parses may run branches concurrently.
    #[must_use]
    pub fn concurrent(&self) -> bool {
        self.concurrent
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("error", &self.error.as_ref().map(|_| "<fn>"))
            .field("report_input", &self.report_input)
            .field("concurrent", &self.concurrent)
            .finish()
    }
}

// ============================================================================
// GLOBAL CONFIG
// ============================================================================

/// Process-wide configuration.
#[derive(Clone, Default)]
pub struct Config {
    pub(crate) error: Option<ErrorMap>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global custom error map.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&PendingIssue<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(f));
        self
    }

    /// Returns the global error map, if any.
    #[must_use]
    pub fn error_map(&self) -> Option<&ErrorMap> {
        self.error.as_ref()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("error", &self.error.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

static GLOBAL: LazyLock<RwLock<Arc<Config>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Config::default())));

/// Installs the global configuration.
pub fn configure(config: Config) {
    tracing::debug!(custom_error = config.error.is_some(), "global config installed");
    *GLOBAL.write() = Arc::new(config);
}

/// Returns a snapshot of the global configuration.
#[must_use]
pub fn current() -> Arc<Config> {
    Arc::clone(&GLOBAL.read())
}

/// Restores the default global configuration.
pub fn reset() {
    tracing::debug!("global config reset");
    *GLOBAL.write() = Arc::new(Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options_builders() {
        let opts = ParseOptions::new()
            .with_report_input(true)
            .with_concurrent(false)
            .with_error(|_| Some("x".into()));
        assert!(opts.report_input());
        assert!(!opts.concurrent());
        assert!(opts.error.is_some());
        assert!(format!("{opts:?}").contains("<fn>"));
    }

    #[test]
    fn defaults_are_concurrent_without_input() {
        let opts = ParseOptions::default();
        assert!(opts.concurrent());
        assert!(!opts.report_input());
    }
}
