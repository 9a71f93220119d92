//! Usage listing and failure reporting.
//!
//! The text listing is a compatibility surface: scripts match on it, so its
//! layout is fixed.
//!
//! ```text
//! Usage: add <number> <number> [options]
//!
//! Options:
//!
//! -h, --help                 Show this help.
//! -a, --additional-number    Set the additional number.
//! ```

use std::io::{self, Write};

use crate::error::DispatchError;
use crate::registry::Registry;

/// Spaces between the padded label column and the description.
const DESCRIPTION_GAP: usize = 4;

/// Supported help output formats.
///
/// Library API for hosts that expose their registration metadata to other
/// tools; the dispatcher and [`report`] always use the text listing. With the
/// `clap` feature the enum can be used directly as a clap argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HelpFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Markdown,
}

/// Writes the usage line and options table to `out`.
///
/// # Examples
///
/// ```
/// use commander_core::*;
///
/// let registry = Registry::builder()
///     .command(CommandDescriptor::new("greet <name>", |_| Ok(())))
///     .option(OptionDescriptor::flag("-l", || Ok(())).with_description("Shout."))
///     .build();
///
/// let mut out = Vec::new();
/// render_help(&registry, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Usage: greet <name>\n\nOptions:\n\n-l    Shout.\n"
/// );
/// ```
pub fn render_help<W: Write + ?Sized>(registry: &Registry, out: &mut W) -> io::Result<()> {
    if let Some(command) = registry.command() {
        writeln!(out, "Usage: {}", command.usage())?;
    }

    let options = registry.distinct_options();
    if !options.is_empty() {
        write!(out, "\nOptions:\n")?;
        let labels: Vec<String> = options.iter().map(|o| o.spec().label()).collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for (label, option) in labels.iter().zip(&options) {
            write!(
                out,
                "\n{label:<width$}{:gap$}{}",
                "",
                option.description(),
                gap = DESCRIPTION_GAP
            )?;
        }
    }

    writeln!(out)
}

/// Returns the listing written by [`render_help`] as a string.
pub fn help_text(registry: &Registry) -> String {
    let mut out = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    let _ = render_help(registry, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// Reports a dispatch failure.
///
/// A messageless failure is a help request: the listing goes to `out`.
/// Anything else writes `Error: <message>` and a blank line to `err`,
/// followed by the listing.
///
/// # Examples
///
/// ```
/// use commander_core::*;
///
/// let registry = Registry::builder()
///     .command(CommandDescriptor::new("run", |_| Ok(())))
///     .build();
///
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let failure = DispatchError::from(HandlerFailure::new("boom"));
/// report(&registry, &failure, &mut out, &mut err).unwrap();
/// assert!(out.is_empty());
/// assert_eq!(String::from_utf8(err).unwrap(), "Error: boom\n\nUsage: run\n\n");
/// ```
pub fn report<O, E>(
    registry: &Registry,
    failure: &DispatchError,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    match failure.message() {
        None => render_help(registry, out),
        Some(message) => {
            write!(err, "Error: {message}\n\n")?;
            render_help(registry, err)
        }
    }
}

/// Formats the registry's help in the requested format.
///
/// `Text` is the exact [`render_help`] listing. `Json` and `Yaml` serialize
/// the registry's [`ControllerManifest`](crate::ControllerManifest).
pub fn format_help(registry: &Registry, format: HelpFormat) -> Result<String, String> {
    match format {
        HelpFormat::Text => Ok(help_text(registry)),
        HelpFormat::Json => serde_json::to_string_pretty(&registry.manifest())
            .map_err(|e| format!("JSON serialization failed: {e}")),
        HelpFormat::Yaml => serde_yaml::to_string(&registry.manifest())
            .map_err(|e| format!("YAML serialization failed: {e}")),
        HelpFormat::Markdown => Ok(help_to_markdown(registry)),
    }
}

fn help_to_markdown(registry: &Registry) -> String {
    let mut out = String::new();

    if let Some(command) = registry.command() {
        out.push_str(&format!("**Usage:** `{}`\n\n", command.usage()));
    }

    let options = registry.distinct_options();
    if !options.is_empty() {
        out.push_str("## Options\n\n");
        out.push_str("| Option | Arguments | Description |\n");
        out.push_str("|--------|-----------|-------------|\n");
        for option in options {
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                option.spec().label(),
                option.arity(),
                option.description()
            ));
        }
        out.push('\n');
    }

    out
}
