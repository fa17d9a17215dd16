//! Runtime settings for logging and read-back.

use crate::logging::LOG_TAG;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_FILTER_ENV: &str = "GPUIMAGE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Where diagnostics go and how verbose they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Tag every log line is filed under.
    pub tag: String,
    /// `EnvFilter` directives, e.g. `"info"` or `"gpuimage_gl=trace"`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            tag: LOG_TAG.to_owned(),
            filter: DEFAULT_FILTER.to_owned(),
        }
    }
}

impl LogConfig {
    /// Defaults, with the filter taken from `GPUIMAGE_LOG` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        config
    }
}

/// Knobs of the GL read-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Drain stale GL errors before the read-back and check `glGetError`
    /// after it.
    pub check_errors: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self { check_errors: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LogConfig::default();
        assert_eq!(config.tag, "libgpuimage");
        assert_eq!(config.filter, "info");
        assert!(CaptureOptions::default().check_errors);
    }

    #[test]
    fn filter_comes_from_environment() {
        let config = LogConfig::from_lookup(|key| {
            assert_eq!(key, LOG_FILTER_ENV);
            Some("gpuimage_gl=trace".to_owned())
        });
        assert_eq!(config.filter, "gpuimage_gl=trace");
        assert_eq!(config.tag, "libgpuimage");
    }

    #[test]
    fn blank_filter_is_ignored() {
        let config = LogConfig::from_lookup(|_| Some("  ".to_owned()));
        assert_eq!(config.filter, "info");

        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config.filter, "info");
    }
}
