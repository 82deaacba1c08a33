//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` (errors when unset) and `${VAR:-default}` (falls back
//! to the default when unset). [`expand_path`] additionally expands a
//! leading `~` to the user's home directory.

use crate::ConfigError;
use std::env::VarError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// `field` names the config field for error reporting.
///
/// # Errors
///
/// Returns `ConfigError::EnvVar` when a referenced variable without a
/// default is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::env_with_context(value, lookup).map_err(|err| {
        ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {}", err.var_name, describe(&err.cause)),
        }
    })?;
    Ok(expanded.into_owned())
}

/// Expand environment references in a path value, then a leading `~`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    Ok(shellexpand::tilde(&expanded).into_owned())
}

/// Variable lookup handling the `VAR:-default` fallback syntax.
fn lookup(name: &str) -> Result<Option<String>, VarError> {
    if let Some((var, default)) = name.split_once(":-") {
        match std::env::var(var) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(Some(default.to_owned())),
            Err(err) => Err(err),
        }
    } else {
        std::env::var(name).map(Some)
    }
}

fn describe(cause: &VarError) -> &'static str {
    match cause {
        VarError::NotPresent => "not set",
        VarError::NotUnicode(_) => "is not valid unicode",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("https://example.com", "site.url").unwrap();
        assert_eq!(result, "https://example.com");
    }

    #[test]
    fn test_expand_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VELLUM_TEST_EXPAND_URL", "https://docs.test.com");
        }

        let result = expand_env("${VELLUM_TEST_EXPAND_URL}", "site.url").unwrap();
        assert_eq!(result, "https://docs.test.com");

        unsafe {
            std::env::remove_var("VELLUM_TEST_EXPAND_URL");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VELLUM_TEST_EXPAND_UNSET");
        }

        let result = expand_env("${VELLUM_TEST_EXPAND_UNSET:-docs}", "docs.source_dir").unwrap();
        assert_eq!(result, "docs");
    }

    #[test]
    fn test_expand_default_ignored_when_set() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VELLUM_TEST_EXPAND_SET", "content");
        }

        let result = expand_env("${VELLUM_TEST_EXPAND_SET:-docs}", "docs.source_dir").unwrap();
        assert_eq!(result, "content");

        unsafe {
            std::env::remove_var("VELLUM_TEST_EXPAND_SET");
        }
    }

    #[test]
    fn test_expand_missing_variable_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VELLUM_TEST_EXPAND_MISSING");
        }

        let err = expand_env("${VELLUM_TEST_EXPAND_MISSING}", "site.url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("VELLUM_TEST_EXPAND_MISSING"));
        assert!(msg.contains("site.url"));
        assert!(msg.contains("not set"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let result = expand_path("content/docs", "docs.source_dir").unwrap();
        assert_eq!(result, "content/docs");
    }

    #[test]
    fn test_expand_path_tilde() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        let result = expand_path("~/docs", "docs.source_dir").unwrap();
        assert_eq!(result, format!("{home}/docs"));
    }
}
