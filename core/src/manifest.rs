//! Declarative registration metadata.
//!
//! A manifest lists the command usage and option metadata as a YAML or JSON
//! document. Handlers are bound to it by name at startup with [`Bindings`],
//! producing a [`Registry`].
//!
//! # Example YAML
//!
//! ```yaml
//! usage: add <number> <number> [options]
//! options:
//!   - name: -h
//!     alias: --help
//!     description: Show this help.
//!   - name: -a
//!     alias: --additional-number
//!     description: Set the additional number.
//!     arity: 1
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::descriptor::{
    CommandDescriptor, CommandHandler, OptionDescriptor, OptionHandler, OptionSpec,
};
use crate::error::{HandlerFailure, ManifestError};
use crate::registry::Registry;

/// Registration metadata for a controller, without handlers.
///
/// # Examples
///
/// ```
/// use commander_core::*;
///
/// let manifest = ControllerManifest::from_yaml_str(
///     "usage: greet <name>\noptions:\n  - name: -l\n    alias: --loud\n",
/// )
/// .unwrap();
///
/// let registry = manifest
///     .bind(
///         Bindings::new()
///             .command(|_| Ok(()))
///             .flag("-l", || Ok(())),
///     )
///     .unwrap();
/// assert!(registry.lookup("--loud").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerManifest {
    /// Usage line of the command; absent when there is no command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Options in declaration order.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl ControllerManifest {
    pub fn new(usage: Option<&str>) -> Self {
        Self {
            usage: usage.map(String::from),
            options: Vec::new(),
        }
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Loads a manifest from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ManifestError::IoError) if the file cannot be
    /// read, or [`YamlError`](ManifestError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let manifest = serde_yaml::from_reader(reader)?;
        Ok(manifest)
    }

    /// Saves the manifest as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Binds handlers to the declared command and options.
    ///
    /// # Errors
    ///
    /// - [`UnboundOption`](ManifestError::UnboundOption) if a declared option
    ///   has no handler.
    /// - [`UnboundCommand`](ManifestError::UnboundCommand) if a usage is
    ///   declared but no command handler was bound.
    /// - [`MissingUsage`](ManifestError::MissingUsage) if a command handler
    ///   was bound without a usage.
    /// - [`UnknownBinding`](ManifestError::UnknownBinding) if a handler was
    ///   bound to a name the manifest does not declare.
    /// - [`ArityMismatch`](ManifestError::ArityMismatch) if a handler takes a
    ///   different number of parameters than the manifest declares.
    pub fn bind(self, mut bindings: Bindings) -> Result<Registry, ManifestError> {
        let command = match (self.usage, bindings.command.take()) {
            (Some(usage), Some(handler)) => Some(CommandDescriptor::from_handler(usage, handler)),
            (Some(_), None) => return Err(ManifestError::UnboundCommand),
            (None, Some(_)) => return Err(ManifestError::MissingUsage),
            (None, None) => None,
        };

        if let Some(name) = bindings
            .order
            .iter()
            .find(|name| !self.options.iter().any(|spec| &spec.name == *name))
        {
            return Err(ManifestError::UnknownBinding(name.clone()));
        }

        let mut options = Vec::with_capacity(self.options.len());
        for spec in self.options {
            let bound = bindings
                .options
                .get(&spec.name)
                .ok_or_else(|| ManifestError::UnboundOption(spec.name.clone()))?;
            if bound.arity != spec.arity {
                return Err(ManifestError::ArityMismatch {
                    option: spec.name,
                    declared: spec.arity,
                    bound: bound.arity,
                });
            }
            let handler = Arc::clone(&bound.handler);
            options.push(OptionDescriptor::from_spec(spec, handler));
        }

        Ok(Registry::build(command, options))
    }
}

/// Handlers keyed by option name, plus the command handler.
///
/// Each option binder records how many parameters its handler takes, and
/// [`ControllerManifest::bind`] rejects a handler whose count differs from
/// the declared arity. A name declared twice in the manifest shares one
/// handler, and the registry keeps the later entry.
///
/// # Examples
///
/// ```
/// use commander_core::*;
///
/// let manifest = ControllerManifest::from_yaml_str("options:\n  - name: -n\n").unwrap();
///
/// // `-n` declares no arity, so a one-parameter handler does not fit.
/// let err = manifest.bind(Bindings::new().unary("-n", |_| Ok(()))).unwrap_err();
/// assert!(matches!(err, ManifestError::ArityMismatch { declared: 0, bound: 1, .. }));
/// ```
#[derive(Default)]
pub struct Bindings {
    command: Option<CommandHandler>,
    options: HashMap<String, BoundOption>,
    order: Vec<String>,
}

struct BoundOption {
    arity: usize,
    handler: OptionHandler,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the command handler.
    pub fn command<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        self.command = Some(Arc::new(handler));
        self
    }

    /// Binds a handler taking no parameters to the option named `name`.
    pub fn flag<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn() -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        self.with_arity(name, 0, move |_| handler())
    }

    /// Binds a handler taking one parameter to the option named `name`.
    pub fn unary<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        self.with_arity(name, 1, move |params| handler(params[0].as_str()))
    }

    /// Binds a handler taking two parameters to the option named `name`.
    pub fn binary<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &str) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        self.with_arity(name, 2, move |params| {
            handler(params[0].as_str(), params[1].as_str())
        })
    }

    /// Binds a handler taking `arity` parameters, handed over as a slice.
    pub fn with_arity<F>(mut self, name: impl Into<String>, arity: usize, handler: F) -> Self
    where
        F: Fn(&[String]) -> Result<(), HandlerFailure> + Send + Sync + 'static,
    {
        let name = name.into();
        let bound = BoundOption {
            arity,
            handler: Arc::new(handler),
        };
        if self.options.insert(name.clone(), bound).is_none() {
            self.order.push(name);
        }
        self
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("command", &self.command.is_some())
            .field("options", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDITION: &str = r#"
usage: add <number> <number> [options]
options:
  - name: -h
    alias: --help
    description: Show this help.
  - name: -a
    alias: --additional-number
    description: Set the additional number.
    arity: 1
"#;

    fn addition_bindings() -> Bindings {
        Bindings::new()
            .command(|_| Ok(()))
            .flag("-h", || Err(HandlerFailure::help()))
            .unary("-a", |_| Ok(()))
    }

    #[test]
    fn test_parse_yaml_manifest() {
        let manifest = ControllerManifest::from_yaml_str(ADDITION).unwrap();
        assert_eq!(
            manifest.usage.as_deref(),
            Some("add <number> <number> [options]")
        );
        assert_eq!(manifest.options.len(), 2);
        assert_eq!(manifest.options[0].arity, 0);
        assert_eq!(manifest.options[1].arity, 1);
        assert_eq!(manifest.options[1].label(), "-a, --additional-number");
    }

    #[test]
    fn test_parse_json_manifest() {
        let manifest = ControllerManifest::from_json_str(
            r#"{"options": [{"name": "-q", "description": "Quiet."}]}"#,
        )
        .unwrap();
        assert_eq!(manifest.usage, None);
        assert_eq!(manifest.options[0].alias(), None);
    }

    #[test]
    fn test_bind_builds_registry() {
        let registry = ControllerManifest::from_yaml_str(ADDITION)
            .unwrap()
            .bind(addition_bindings())
            .unwrap();

        assert_eq!(
            registry.command().unwrap().usage(),
            "add <number> <number> [options]"
        );
        assert_eq!(registry.lookup("--additional-number").unwrap().arity(), 1);
        assert_eq!(registry.distinct_options().len(), 2);
    }

    #[test]
    fn test_bind_rejects_unbound_option() {
        let err = ControllerManifest::from_yaml_str(ADDITION)
            .unwrap()
            .bind(Bindings::new().command(|_| Ok(())).flag("-h", || Ok(())))
            .unwrap_err();
        assert!(matches!(err, ManifestError::UnboundOption(name) if name == "-a"));
    }

    #[test]
    fn test_bind_rejects_unbound_command() {
        let manifest = ControllerManifest::new(Some("run"));
        let err = manifest.bind(Bindings::new()).unwrap_err();
        assert!(matches!(err, ManifestError::UnboundCommand));
    }

    #[test]
    fn test_bind_rejects_command_without_usage() {
        let manifest = ControllerManifest::new(None);
        let err = manifest.bind(Bindings::new().command(|_| Ok(()))).unwrap_err();
        assert!(matches!(err, ManifestError::MissingUsage));
    }

    #[test]
    fn test_bind_rejects_unknown_binding() {
        let err = ControllerManifest::from_yaml_str(ADDITION)
            .unwrap()
            .bind(addition_bindings().flag("--verbose", || Ok(())))
            .unwrap_err();
        assert!(matches!(err, ManifestError::UnknownBinding(name) if name == "--verbose"));
    }

    #[test]
    fn test_bind_duplicate_declaration_last_wins() {
        let manifest = ControllerManifest::new(None)
            .with_option(OptionSpec::new("-n", 1).with_description("first"))
            .with_option(OptionSpec::new("-n", 1).with_description("second"));

        let registry = manifest.bind(Bindings::new().unary("-n", |_| Ok(()))).unwrap();
        let option = registry.lookup("-n").unwrap();
        assert_eq!(option.description(), "second");
        assert_eq!(option.arity(), 1);
        assert_eq!(registry.distinct_options().len(), 1);
    }

    #[test]
    fn test_bind_rejects_arity_mismatch() {
        // arity left out of the manifest defaults to 0
        let manifest = ControllerManifest::from_yaml_str("options:\n  - name: -a\n").unwrap();
        assert_eq!(manifest.options[0].arity, 0);

        let err = manifest.bind(Bindings::new().unary("-a", |_| Ok(()))).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::ArityMismatch { ref option, declared: 0, bound: 1 } if option == "-a"
        ));
        assert_eq!(
            err.to_string(),
            "option -a declares 0 parameter(s) but its handler takes 1"
        );
    }

    #[test]
    fn test_bound_unary_handler_receives_parameter() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let registry = ControllerManifest::from_yaml_str(ADDITION)
            .unwrap()
            .bind(
                Bindings::new()
                    .command(|_| Ok(()))
                    .flag("-h", || Ok(()))
                    .unary("-a", move |value| {
                        sink.lock().unwrap().push(value.to_string());
                        Ok(())
                    }),
            )
            .unwrap();

        crate::Dispatcher::new(registry)
            .execute(["--additional-number", "3", "1", "2"])
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["3".to_string()]);
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("controller.yaml");

        let manifest = ControllerManifest::from_yaml_str(ADDITION).unwrap();
        manifest.save(&path).unwrap();
        let loaded = ControllerManifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControllerManifest::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ManifestError::IoError(_)));
    }
}
