//! Argument scanning and handler dispatch.
//!
//! The scan walks the arguments once, left to right. A token equal to a
//! registered name or alias always invokes that option, immediately, with
//! the next `arity` tokens; every other token is kept as a positional. The
//! command runs last, with the positionals in their original order.
//!
//! Because option handlers run inline, a handler that fails (for example a
//! help flag returning [`HandlerFailure::help`]) stops the scan before the
//! command is reached.
//!
//! [`HandlerFailure::help`]: crate::HandlerFailure::help

use std::collections::VecDeque;
use std::io::{self, Write};

use tracing::{debug, trace};

use crate::error::{DispatchError, Result};
use crate::present;
use crate::registry::Registry;

/// Runs argument vectors against a [`Registry`].
///
/// Holds no state between calls; concurrent calls are as safe as the
/// registered handlers are.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use commander_core::*;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let dispatcher = Dispatcher::new(
///     Registry::builder()
///         .command(CommandDescriptor::new("echo <word>...", move |words| {
///             sink.lock().unwrap().extend_from_slice(words);
///             Ok(())
///         }))
///         .option(OptionDescriptor::unary("-n", |_| Ok(())))
///         .build(),
/// );
///
/// dispatcher.execute(["hello", "-n", "1", "world"]).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec!["hello", "world"]);
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Scans `args`, firing option handlers as they match, then runs the
    /// command with the remaining tokens.
    ///
    /// # Errors
    ///
    /// - [`MissingArgument`](DispatchError::MissingArgument) if an option
    ///   needs more tokens than remain. Nothing after it runs.
    /// - [`Handler`](DispatchError::Handler) with the handler's failure,
    ///   unchanged, if any handler fails. Nothing after it runs.
    ///
    /// Without a registered command, positionals are dropped and the call
    /// succeeds.
    pub fn execute<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue: VecDeque<String> = args.into_iter().map(Into::into).collect();
        let mut positionals = Vec::new();

        while let Some(token) = queue.pop_front() {
            let Some(option) = self.registry.lookup(&token) else {
                trace!(token = %token, "Positional argument");
                positionals.push(token);
                continue;
            };

            let arity = option.arity();
            if queue.len() < arity {
                debug!(
                    option = option.name(),
                    arity,
                    remaining = queue.len(),
                    "Option is missing arguments"
                );
                return Err(DispatchError::MissingArgument {
                    option: option.name().to_string(),
                });
            }

            let params: Vec<String> = queue.drain(..arity).collect();
            debug!(option = option.name(), token = %token, params = ?params, "Invoking option");
            option.invoke(&params)?;
        }

        match self.registry.command() {
            Some(command) => {
                debug!(usage = command.usage(), positionals = ?positionals, "Invoking command");
                command.invoke(&positionals)?;
            }
            None if !positionals.is_empty() => {
                debug!(dropped = positionals.len(), "No command registered, dropping positionals");
            }
            None => {}
        }

        Ok(())
    }

    /// Writes the usage listing to `out`.
    pub fn render_help<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        present::render_help(&self.registry, out)
    }

    /// Reports `failure` to `out` (help requests) or `err` (everything else).
    pub fn report<O, E>(&self, failure: &DispatchError, out: &mut O, err: &mut E) -> io::Result<()>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        present::report(&self.registry, failure, out, err)
    }

    /// Reports `failure` to the process's stdout or stderr.
    pub fn print_failure(&self, failure: &DispatchError) -> io::Result<()> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.report(failure, &mut stdout.lock(), &mut stderr.lock())
    }
}
