//! Option and command descriptors.
//!
//! A descriptor pairs registration metadata with the handler that runs when
//! the dispatcher matches it. Metadata lives in [`OptionSpec`] so it can be
//! serialized and validated on its own; handlers are plain closures.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::HandlerFailure;

/// Handler invoked with exactly `arity` parameters when an option matches.
pub type OptionHandler = Arc<dyn Fn(&[String]) -> Result<(), HandlerFailure> + Send + Sync>;

/// Handler invoked once with every positional token collected by the scan.
pub type CommandHandler = Arc<dyn Fn(&[String]) -> Result<(), HandlerFailure> + Send + Sync>;

/// Registration metadata for an option.
///
/// # Examples
///
/// ```
/// use commander_core::OptionSpec;
///
/// let spec = OptionSpec::new("-a", 1)
///     .with_alias("--additional-number")
///     .with_description("Set the additional number.");
/// assert_eq!(spec.label(), "-a, --additional-number");
///
/// let bare = OptionSpec::new("-v", 0);
/// assert_eq!(bare.label(), "-v");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Primary token (e.g., "-h")
    pub name: String,
    /// Secondary token (e.g., "--help")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Text shown in the options listing
    #[serde(default)]
    pub description: String,
    /// Number of following tokens the option consumes
    #[serde(default)]
    pub arity: usize,
}

impl OptionSpec {
    /// Creates metadata for an option consuming `arity` tokens.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: String::new(),
            arity,
        }
    }

    /// Sets the alias. An empty alias means no alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the alias, treating an empty string as absent.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns the label used in the options listing.
    pub fn label(&self) -> String {
        match self.alias() {
            Some(alias) => format!("{}, {alias}", self.name),
            None => self.name.clone(),
        }
    }

    /// Checks if `token` is this option's name or alias.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.alias() == Some(token)
    }
}

/// An option: metadata plus the handler to run when it matches.
///
/// Use the per-arity constructors so the handler signature lines up with the
/// number of tokens the option consumes.
///
/// # Examples
///
/// ```
/// use commander_core::{HandlerFailure, OptionDescriptor};
///
/// let help = OptionDescriptor::flag("-h", || Err(HandlerFailure::help()))
///     .with_alias("--help")
///     .with_description("Show this help.");
/// assert_eq!(help.arity(), 0);
///
/// let level = OptionDescriptor::unary("-l", |level| {
///     level.parse::<u8>().map(|_| ()).map_err(HandlerFailure::from_error)
/// });
/// assert_eq!(level.arity(), 1);
/// ```
pub struct OptionDescriptor {
    spec: OptionSpec,
    handler: OptionHandler,
}

impl OptionDescriptor {
    /// Creates an option that consumes no tokens.
    pub fn flag<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn() -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        Self::with_arity(name, 0, move |_| handler())
    }

    /// Creates an option that consumes one token.
    pub fn unary<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        Self::with_arity(name, 1, move |params| handler(params[0].as_str()))
    }

    /// Creates an option that consumes two tokens.
    pub fn binary<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &str) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        Self::with_arity(name, 2, move |params| {
            handler(params[0].as_str(), params[1].as_str())
        })
    }

    /// Creates an option that consumes `arity` tokens, handed over as a slice.
    pub fn with_arity<F>(name: impl Into<String>, arity: usize, handler: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        Self::from_spec(OptionSpec::new(name, arity), Arc::new(handler))
    }

    /// Pairs existing metadata with a handler.
    pub fn from_spec(spec: OptionSpec, handler: OptionHandler) -> Self {
        Self { spec, handler }
    }

    /// Sets the alias. An empty alias means no alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.spec = self.spec.with_alias(alias);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.spec = self.spec.with_description(description);
        self
    }

    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.spec.alias()
    }

    pub fn description(&self) -> &str {
        &self.spec.description
    }

    pub fn arity(&self) -> usize {
        self.spec.arity
    }

    /// Runs the handler. `params` must hold exactly [`arity`](Self::arity) tokens.
    pub(crate) fn invoke(&self, params: &[String]) -> Result<(), HandlerFailure> {
        debug_assert_eq!(params.len(), self.arity());
        (self.handler)(params)
    }
}

impl fmt::Debug for OptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// The single positional command.
///
/// # Examples
///
/// ```
/// use commander_core::CommandDescriptor;
///
/// let cmd = CommandDescriptor::new("echo <word>...", |words| {
///     println!("{}", words.join(" "));
///     Ok(())
/// });
/// assert_eq!(cmd.usage(), "echo <word>...");
/// ```
pub struct CommandDescriptor {
    usage: String,
    handler: CommandHandler,
}

impl CommandDescriptor {
    /// Creates a command with the given usage line.
    pub fn new<F>(usage: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        Self::from_handler(usage, Arc::new(handler))
    }

    /// Creates a command from a shared handler.
    pub fn from_handler(usage: impl Into<String>, handler: CommandHandler) -> Self {
        Self {
            usage: usage.into(),
            handler,
        }
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub(crate) fn invoke(&self, positionals: &[String]) -> Result<(), HandlerFailure> {
        (self.handler)(positionals)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_empty_alias_is_absent() {
        let spec = OptionSpec::new("-v", 0).with_alias("");
        assert_eq!(spec.alias, None);
        assert_eq!(spec.label(), "-v");
    }

    #[test]
    fn test_deserialized_empty_alias_is_absent() {
        let spec: OptionSpec =
            serde_json::from_str(r#"{"name": "-v", "alias": ""}"#).unwrap();
        assert_eq!(spec.alias(), None);
        assert_eq!(spec.label(), "-v");
        assert!(!spec.matches(""));
        assert_eq!(spec.arity, 0);
    }

    #[test]
    fn test_spec_matches_name_and_alias() {
        let spec = OptionSpec::new("-h", 0).with_alias("--help");
        assert!(spec.matches("-h"));
        assert!(spec.matches("--help"));
        assert!(!spec.matches("help"));
    }

    #[test]
    fn test_binary_handler_receives_both_params() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let option = OptionDescriptor::binary("--range", move |from, to| {
            sink.lock().unwrap().push(format!("{from}..{to}"));
            Ok(())
        });

        assert_eq!(option.arity(), 2);
        option.invoke(&["1".to_string(), "5".to_string()]).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["1..5".to_string()]);
    }

    #[test]
    fn test_debug_omits_handler() {
        let option = OptionDescriptor::flag("-q", || Ok(())).with_description("Quiet.");
        let rendered = format!("{option:?}");
        assert!(rendered.contains("\"-q\""));
        assert!(rendered.contains("Quiet."));
    }
}
