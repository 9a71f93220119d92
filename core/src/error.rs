//! Error types for dispatch and registration.
//!
//! Dispatch failures come in two kinds: the engine ran out of tokens for an
//! option ([`DispatchError::MissingArgument`]), or a handler gave up
//! ([`DispatchError::Handler`]). Manifest binding has its own error type,
//! [`ManifestError`], since it is the only registration path that can fail.

use thiserror::Error;

/// Boxed error kept as the cause of a [`HandlerFailure`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure raised by an option or command handler.
///
/// A failure without a message is the "show help" signal: the presenter
/// prints the usage listing to the success stream instead of reporting an
/// error.
///
/// # Examples
///
/// ```
/// use commander_core::HandlerFailure;
///
/// let help = HandlerFailure::help();
/// assert!(help.is_help());
/// assert_eq!(help.message(), None);
///
/// let parse = "x".parse::<i32>().unwrap_err();
/// let failure = HandlerFailure::from_error(parse);
/// assert_eq!(failure.message(), Some("invalid digit found in string"));
/// ```
#[derive(Debug, Error)]
#[error("{}", .message.as_deref().unwrap_or("help requested"))]
pub struct HandlerFailure {
    message: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl HandlerFailure {
    /// Creates a failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            source: None,
        }
    }

    /// Creates a messageless failure that aborts dispatch and asks for help.
    pub fn help() -> Self {
        Self {
            message: None,
            source: None,
        }
    }

    /// Wraps an error, using its display text as the message.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: Some(err.to_string()),
            source: Some(Box::new(err)),
        }
    }

    /// Attaches an underlying cause while keeping the current message.
    pub fn with_source<E>(mut self, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(err));
        self
    }

    /// Returns the message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` for the messageless "show help" failure.
    pub fn is_help(&self) -> bool {
        self.message.is_none()
    }
}

/// Errors surfaced by [`Dispatcher::execute`](crate::Dispatcher::execute).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// An option needed more following tokens than remained.
    #[error("Missing argument(s) for option {option}")]
    MissingArgument {
        /// Primary name of the option, even when matched through its alias.
        option: String,
    },

    /// A handler failed; passed through unchanged.
    #[error(transparent)]
    Handler(#[from] HandlerFailure),
}

impl DispatchError {
    /// Returns the user-facing message, or `None` for a help request.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::MissingArgument { .. } => Some(self.to_string()),
            Self::Handler(failure) => failure.message().map(String::from),
        }
    }

    /// Returns `true` when the failure is a messageless help request.
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Handler(failure) if failure.is_help())
    }
}

/// Errors that can occur while loading or binding a
/// [`ControllerManifest`](crate::ControllerManifest).
#[derive(Debug, Error)]
pub enum ManifestError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The manifest declares an option with no handler bound to it.
    #[error("no handler bound for option: {0}")]
    UnboundOption(String),

    /// The manifest declares a usage but no command handler was bound.
    #[error("no handler bound for command")]
    UnboundCommand,

    /// A command handler was bound but the manifest has no usage line.
    #[error("command handler bound but manifest declares no usage")]
    MissingUsage,

    /// A handler was bound to a name the manifest does not declare.
    #[error("handler bound to undeclared option: {0}")]
    UnknownBinding(String),

    /// A handler takes a different number of parameters than declared.
    #[error("option {option} declares {declared} parameter(s) but its handler takes {bound}")]
    ArityMismatch {
        /// Primary name of the option.
        option: String,
        /// Arity from the manifest.
        declared: usize,
        /// Parameter count of the bound handler.
        bound: usize,
    },
}

/// Convenience alias for dispatch results.
pub type Result<T> = std::result::Result<T, DispatchError>;
