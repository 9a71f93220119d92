//! Option and command registry.
//!
//! The registry maps every recognized token (an option's name and, when
//! present, its alias) to the option it belongs to. It is built once and is
//! read-only afterwards.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::descriptor::{CommandDescriptor, OptionDescriptor, OptionSpec};
use crate::manifest::ControllerManifest;
use crate::validate::validate_options;

/// Immutable token-to-option mapping plus the optional command.
///
/// Keys keep first-seen order. Registering a key again replaces the option it
/// points to without moving the key, so an option whose keys were all taken
/// over later is no longer reachable or listed.
///
/// # Examples
///
/// ```
/// use commander_core::*;
///
/// let registry = Registry::builder()
///     .command(CommandDescriptor::new("add <number> <number> [options]", |_| Ok(())))
///     .option(
///         OptionDescriptor::flag("-h", || Err(HandlerFailure::help()))
///             .with_alias("--help")
///             .with_description("Show this help."),
///     )
///     .build();
///
/// assert_eq!(registry.lookup("--help").unwrap().name(), "-h");
/// assert_eq!(registry.distinct_options().len(), 1);
/// assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["-h", "--help"]);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    command: Option<CommandDescriptor>,
    options: Vec<OptionDescriptor>,
    /// Token -> index into `options`. The index is the option's identity.
    keys: IndexMap<String, usize>,
}

impl Registry {
    /// Builds a registry from host-supplied descriptors in declaration order.
    ///
    /// Never fails. Conflicting keys are resolved last-write-wins and logged.
    pub fn build(command: Option<CommandDescriptor>, options: Vec<OptionDescriptor>) -> Self {
        let specs: Vec<OptionSpec> = options.iter().map(|o| o.spec().clone()).collect();
        for problem in validate_options(&specs) {
            warn!(%problem, "Conflicting option registration");
        }

        let mut keys: IndexMap<String, usize> = IndexMap::with_capacity(options.len() * 2);
        for (index, option) in options.iter().enumerate() {
            insert_key(&mut keys, option.name(), index);
            if let Some(alias) = option.alias() {
                insert_key(&mut keys, alias, index);
            }
        }

        debug!(
            command = command.as_ref().map(CommandDescriptor::usage),
            options = options.len(),
            keys = keys.len(),
            "Built registry"
        );

        Self {
            command,
            options,
            keys,
        }
    }

    /// Starts a fluent registry definition.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Finds the option registered under `token` (name or alias).
    pub fn lookup(&self, token: &str) -> Option<&OptionDescriptor> {
        self.keys.get(token).map(|&index| &self.options[index])
    }

    /// Returns the command, if one was registered.
    pub fn command(&self) -> Option<&CommandDescriptor> {
        self.command.as_ref()
    }

    /// Returns each reachable option once, in key order.
    ///
    /// An option registered under both a name and an alias appears once, at
    /// the position of whichever of its keys was seen first.
    pub fn distinct_options(&self) -> Vec<&OptionDescriptor> {
        let mut seen = HashSet::with_capacity(self.options.len());
        self.keys
            .values()
            .filter(|&&index| seen.insert(index))
            .map(|&index| &self.options[index])
            .collect()
    }

    /// Iterates over every registered token in registry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Number of distinct reachable options.
    pub fn len(&self) -> usize {
        self.distinct_options().len()
    }

    /// Returns `true` when no option is registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exports the registration metadata, without handlers.
    pub fn manifest(&self) -> ControllerManifest {
        ControllerManifest {
            usage: self.command().map(|c| c.usage().to_string()),
            options: self
                .distinct_options()
                .into_iter()
                .map(|o| o.spec().clone())
                .collect(),
        }
    }
}

fn insert_key(keys: &mut IndexMap<String, usize>, key: &str, index: usize) {
    if let Some(previous) = keys.insert(key.to_string(), index) {
        if previous != index {
            debug!(key, previous, index, "Option key overwritten");
        }
    }
}

/// Fluent builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    command: Option<CommandDescriptor>,
    options: Vec<OptionDescriptor>,
}

impl RegistryBuilder {
    /// Sets the command. Setting it twice keeps the last one.
    pub fn command(mut self, command: CommandDescriptor) -> Self {
        self.command = Some(command);
        self
    }

    /// Adds an option.
    pub fn option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    pub fn build(self) -> Registry {
        Registry::build(self.command, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &str) -> OptionDescriptor {
        OptionDescriptor::flag(name, || Ok(()))
    }

    #[test]
    fn test_lookup_by_name_and_alias() {
        let registry = Registry::build(
            None,
            vec![noop("-h").with_alias("--help"), noop("-v")],
        );

        assert_eq!(registry.lookup("-h").unwrap().name(), "-h");
        assert_eq!(registry.lookup("--help").unwrap().name(), "-h");
        assert_eq!(registry.lookup("-v").unwrap().name(), "-v");
        assert!(registry.lookup("--verbose").is_none());
        assert!(registry.command().is_none());
    }

    #[test]
    fn test_distinct_options_lists_aliased_option_once() {
        let registry = Registry::build(
            None,
            vec![
                noop("-h").with_alias("--help"),
                noop("-a").with_alias("--additional-number"),
            ],
        );

        let names: Vec<&str> = registry.distinct_options().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["-h", "-a"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["-h", "--help", "-a", "--additional-number"]
        );
    }

    #[test]
    fn test_identical_metadata_is_not_deduplicated() {
        let registry = Registry::build(
            None,
            vec![
                noop("-x").with_description("Same text."),
                noop("-y").with_description("Same text."),
            ],
        );
        assert_eq!(registry.distinct_options().len(), 2);
    }

    #[test]
    fn test_duplicate_key_last_write_wins_keeps_position() {
        let registry = Registry::build(
            None,
            vec![
                noop("-a").with_description("first"),
                noop("-b"),
                noop("-a").with_description("second"),
            ],
        );

        assert_eq!(registry.lookup("-a").unwrap().description(), "second");
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["-a", "-b"]);

        let descriptions: Vec<&str> = registry
            .distinct_options()
            .iter()
            .map(|o| o.description())
            .collect();
        assert_eq!(descriptions, vec!["second", ""]);
    }

    #[test]
    fn test_partially_shadowed_option_stays_listed() {
        let registry = Registry::build(
            None,
            vec![
                noop("-v").with_alias("--verbose").with_description("Verbose."),
                noop("--verbose").with_description("Also verbose."),
            ],
        );

        assert_eq!(registry.lookup("-v").unwrap().description(), "Verbose.");
        assert_eq!(
            registry.lookup("--verbose").unwrap().description(),
            "Also verbose."
        );
        assert_eq!(registry.distinct_options().len(), 2);
    }

    #[test]
    fn test_manifest_exports_distinct_metadata() {
        let registry = Registry::builder()
            .command(CommandDescriptor::new("run <file>", |_| Ok(())))
            .option(noop("-h").with_alias("--help").with_description("Help."))
            .build();

        let manifest = registry.manifest();
        assert_eq!(manifest.usage.as_deref(), Some("run <file>"));
        assert_eq!(manifest.options.len(), 1);
        assert_eq!(manifest.options[0].label(), "-h, --help");
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::build(None, Vec::new());
        assert!(registry.is_empty());
        assert!(registry.distinct_options().is_empty());
    }
}
