//! The addition controller: `add <number> <number> [options]`.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use commander_core::{Bindings, ControllerManifest, HandlerFailure, ManifestError, Registry};
use tracing::debug;

/// Registration metadata for the controller.
const MANIFEST: &str = include_str!("../addition.yaml");

/// Adds two numbers plus an optional additional number set by `-a`.
#[derive(Debug, Default)]
pub struct Addition {
    additional: AtomicI64,
}

impl Addition {
    /// Handler for `-a/--additional-number`.
    pub fn set_additional_number(&self, value: &str) -> Result<(), HandlerFailure> {
        let value = parse_number(value)?;
        debug!(value, "Additional number set");
        self.additional.store(value, Ordering::SeqCst);
        Ok(())
    }

    /// Handler for the command. Returns the line to print.
    pub fn add(&self, args: &[String]) -> Result<String, HandlerFailure> {
        let a = parse_number(operand(args, 0)?)?;
        let b = parse_number(operand(args, 1)?)?;
        let additional = self.additional.load(Ordering::SeqCst);
        let line = if additional == 0 {
            format!("{a} + {b} = {}", a + b)
        } else {
            format!("{a} + {b} + {additional} = {}", a + b + additional)
        };
        Ok(line)
    }
}

fn operand(args: &[String], index: usize) -> Result<&str, HandlerFailure> {
    args.get(index).map(String::as_str).ok_or_else(|| {
        HandlerFailure::new(format!("Expected 2 numbers but got {}", args.len()))
    })
}

fn parse_number(s: &str) -> Result<i64, HandlerFailure> {
    s.parse()
        .map_err(|e| HandlerFailure::new(format!("For input string: \"{s}\"")).with_source(e))
}

/// Binds the controller's handlers to the bundled manifest.
pub fn registry(addition: Arc<Addition>) -> Result<Registry, ManifestError> {
    let on_command = Arc::clone(&addition);
    let bindings = Bindings::new()
        .command(move |args| {
            println!("{}", on_command.add(args)?);
            Ok(())
        })
        .flag("-h", || Err(HandlerFailure::help()))
        .unary("-a", move |value| addition.set_additional_number(value));

    ControllerManifest::from_yaml_str(MANIFEST)?.bind(bindings)
}
