//! Registration validation.
//!
//! Registration itself never fails: conflicting keys are resolved by the
//! registry with last-write-wins. These checks surface the conflicts so a
//! host can catch them in tests, and the registry logs them when it is built.
//!
//! # Examples
//!
//! ```
//! use commander_core::*;
//!
//! let manifest = ControllerManifest::new(Some("add <number> <number>"))
//!     .with_option(OptionSpec::new("-h", 0).with_alias("--help"));
//! assert!(validate_manifest(&manifest).is_empty());
//!
//! // Invalid: alias reuses another option's name
//! let bad = ControllerManifest::new(None)
//!     .with_option(OptionSpec::new("-h", 0))
//!     .with_option(OptionSpec::new("-x", 0).with_alias("-h"));
//! assert!(!validate_manifest(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ControllerManifest, OptionSpec};

/// Registration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Option name is empty or whitespace-only.
    #[error("option name cannot be empty")]
    EmptyOptionName,
    /// A name or alias is claimed by more than one option.
    #[error("duplicate option key: {0}")]
    DuplicateKey(String),
    /// An option's alias is the same token as its name.
    #[error("alias repeats option name: {0}")]
    AliasMatchesName(String),
    /// Usage line is present but blank.
    #[error("command usage cannot be empty")]
    EmptyUsage,
}

/// Validates a full manifest: the usage line, then every option.
pub fn validate_manifest(manifest: &ControllerManifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(usage) = &manifest.usage {
        if usage.trim().is_empty() {
            errors.push(ValidationError::EmptyUsage);
            return errors;
        }
    }

    errors.extend(validate_options(&manifest.options));
    errors
}

/// Validates option metadata in declaration order.
///
/// Stops at the first problem.
///
/// # Examples
///
/// ```
/// use commander_core::*;
///
/// let options = vec![
///     OptionSpec::new("-a", 1).with_alias("--additional-number"),
///     OptionSpec::new("-a", 0),
/// ];
/// assert_eq!(
///     validate_options(&options),
///     vec![ValidationError::DuplicateKey("-a".to_string())]
/// );
/// ```
pub fn validate_options(options: &[OptionSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for option in options {
        let name = option.name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyOptionName);
            return errors;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateKey(name.to_string()));
            return errors;
        }

        if let Some(alias) = option.alias() {
            if alias == name {
                errors.push(ValidationError::AliasMatchesName(name.to_string()));
                return errors;
            }
            if !seen.insert(alias) {
                errors.push(ValidationError::DuplicateKey(alias.to_string()));
                return errors;
            }
        }
    }

    errors
}
