//! Single-command CLI dispatch.
//!
//! A host program registers one positional command and any number of named
//! options, then hands the raw argument vector to a [`Dispatcher`]:
//!
//! - [`Registry`] — maps option names and aliases to [`OptionDescriptor`]s
//!   and holds the optional [`CommandDescriptor`].
//! - [`Dispatcher`] — scans the arguments left to right, runs option handlers
//!   inline as their tokens appear, then runs the command with the leftover
//!   positional tokens.
//! - [`render_help`] / [`report`] — print the usage listing, and turn a
//!   [`DispatchError`] into user-facing text on stdout or stderr.
//!
//! Registration metadata can also come from a YAML or JSON
//! [`ControllerManifest`], with handlers attached by name through
//! [`Bindings`]. [`validate_manifest`] flags conflicting keys that the
//! registry would otherwise resolve silently.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI64, Ordering};
//!
//! use commander_core::*;
//!
//! let extra = Arc::new(AtomicI64::new(0));
//! let total = Arc::new(AtomicI64::new(0));
//!
//! let dispatcher = Dispatcher::new(
//!     Registry::builder()
//!         .command(CommandDescriptor::new("add <number> <number> [options]", {
//!             let (extra, total) = (Arc::clone(&extra), Arc::clone(&total));
//!             move |args| {
//!                 let mut sum = extra.load(Ordering::SeqCst);
//!                 for arg in args {
//!                     sum += arg.parse::<i64>().map_err(HandlerFailure::from_error)?;
//!                 }
//!                 total.store(sum, Ordering::SeqCst);
//!                 Ok(())
//!             }
//!         }))
//!         .option(
//!             OptionDescriptor::unary("-a", {
//!                 let extra = Arc::clone(&extra);
//!                 move |n| {
//!                     extra.store(n.parse().map_err(HandlerFailure::from_error)?, Ordering::SeqCst);
//!                     Ok(())
//!                 }
//!             })
//!             .with_alias("--additional-number")
//!             .with_description("Set the additional number."),
//!         )
//!         .option(
//!             OptionDescriptor::flag("-h", || Err(HandlerFailure::help()))
//!                 .with_alias("--help")
//!                 .with_description("Show this help."),
//!         )
//!         .build(),
//! );
//!
//! dispatcher.execute(["-a", "3", "1", "2"]).unwrap();
//! assert_eq!(total.load(Ordering::SeqCst), 6);
//!
//! let err = dispatcher.execute(["--help"]).unwrap_err();
//! assert!(err.is_help());
//! ```

mod descriptor;
mod dispatch;
mod error;
mod manifest;
mod present;
mod registry;
mod validate;

pub use descriptor::{
    CommandDescriptor, CommandHandler, OptionDescriptor, OptionHandler, OptionSpec,
};
pub use dispatch::Dispatcher;
pub use error::{BoxError, DispatchError, HandlerFailure, ManifestError, Result};
pub use manifest::{Bindings, ControllerManifest};
pub use present::{HelpFormat, format_help, help_text, render_help, report};
pub use registry::{Registry, RegistryBuilder};
pub use validate::{ValidationError, validate_manifest, validate_options};
