//! Environment handling utilities
//!
//! Provides environment variable lookups and shell-style expansion of
//! path arguments.

use crate::error::{ConsoleError, Result};
use regex::{Captures, Regex};
use std::env;
use tracing::debug;

/// Expands `$VAR`, `${VAR}` (and `%VAR%` on Windows) plus a leading `~`
#[derive(Debug)]
pub struct PathExpander {
    unix_vars: Regex,
    windows_vars: Option<Regex>,
}

impl PathExpander {
    /// Create a new expander
    pub fn new() -> Result<Self> {
        let unix_vars = Regex::new(r"\$(?:\{([^}]+)\}|([A-Za-z0-9_]+))")
            .map_err(|e| ConsoleError::config(format!("Invalid variable pattern: {e}")))?;
        let windows_vars = if cfg!(windows) {
            Some(
                Regex::new(r"%([^%]+)%")
                    .map_err(|e| ConsoleError::config(format!("Invalid variable pattern: {e}")))?,
            )
        } else {
            None
        };

        Ok(Self {
            unix_vars,
            windows_vars,
        })
    }

    /// Expand variables from the process environment, then `~`
    pub fn expand(&self, raw: &str) -> String {
        self.expand_with(raw, |name| env::var(name).ok())
    }

    /// Expand variables through `lookup`, then `~`. Unknown variables stay as
    /// written.
    pub fn expand_with<F>(&self, raw: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut expanded = self
            .unix_vars
            .replace_all(raw, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                lookup(name).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();

        if let Some(windows_vars) = &self.windows_vars {
            expanded = windows_vars
                .replace_all(&expanded, |caps: &Captures<'_>| {
                    lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned();
        }

        let expanded = expand_home(&expanded, lookup);
        if expanded != raw {
            debug!("Expanded '{}' to '{}'", raw, expanded);
        }
        expanded
    }
}

fn expand_home<F>(path: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let Some(rest) = path.strip_prefix('~') else {
        return path.to_string();
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        return path.to_string();
    }

    match lookup("HOME").or_else(|| lookup("USERPROFILE")) {
        Some(home) => format!("{home}{rest}"),
        None => path.to_string(),
    }
}

/// Environment variable utilities
#[derive(Debug)]
pub struct EnvUtils;

impl EnvUtils {
    /// Get a non-empty environment variable
    pub fn get_non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/gaq".to_string()),
            "GAMES" => Some("/srv/games".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_dollar_variables() {
        let expander = PathExpander::new().unwrap();
        assert_eq!(expander.expand_with("$GAMES/tf2", lookup), "/srv/games/tf2");
        assert_eq!(expander.expand_with("${GAMES}x", lookup), "/srv/gamesx");
    }

    #[test]
    fn test_unknown_variables_are_kept() {
        let expander = PathExpander::new().unwrap();
        assert_eq!(expander.expand_with("$NOPE/a", lookup), "$NOPE/a");
        assert_eq!(expander.expand_with("${NOPE}", lookup), "${NOPE}");
    }

    #[test]
    fn test_expand_home() {
        let expander = PathExpander::new().unwrap();
        assert_eq!(expander.expand_with("~", lookup), "/home/gaq");
        assert_eq!(expander.expand_with("~/docs", lookup), "/home/gaq/docs");
        assert_eq!(expander.expand_with("~other/docs", lookup), "~other/docs");
        assert_eq!(expander.expand_with("a/~", lookup), "a/~");
    }

    #[test]
    fn test_get_non_empty() {
        assert!(EnvUtils::get_non_empty("GAQ9000_TEST_NONEXISTENT_VAR").is_none());
    }
}
