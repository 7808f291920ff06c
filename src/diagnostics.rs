//!
//! # Overview
//!
//! This module defines the unified, `miette`-based diagnostic system for value
//! resolution. Every failure produced while declaring ranges, resolving
//! parameters, or loading plan files is a [`CombinatorialError`].
//!
//! # Error Construction Macros
//!
//! - **Use `range_err!` for invalid range declarations.**
//!   - `range_err!("count", "count must be at least one, got {}", count)`
//!
//! - **Use `plan_err!` for malformed plan files.**
//!   - `plan_err!("unknown numeric kind {}", kind_name)`
//!
//! Attach help text with [`CombinatorialError::with_help`] rather than building
//! an [`ErrorContext`] by hand.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error carried as the `source` of a diagnostic.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Type-safe error classification that corresponds to `CombinatorialError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Bad count, zero step, or a step whose sign disagrees with the bounds
    InvalidRange,
    /// No declared source matched and the type has no default enumeration
    UnsupportedType,
    /// A required input was absent
    MissingArgument,
    /// A member data source reported a failure
    MemberData,
    /// Malformed plan file
    Plan,
    /// Plan file could not be read
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidRange => "InvalidRange",
            ErrorType::UnsupportedType => "UnsupportedType",
            ErrorType::MissingArgument => "MissingArgument",
            ErrorType::MemberData => "MemberData",
            ErrorType::Plan => "Plan",
            ErrorType::Io => "Io",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal error context for diagnostics.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Returns an empty error context.
    pub fn none() -> Self {
        Self { help: None }
    }

    /// Creates a context carrying a help message.
    pub fn with_help(help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
        }
    }
}

/// Unified error type for all failure modes of range declaration, value resolution and plan loading.
#[derive(Debug, Error)]
pub enum CombinatorialError {
    #[error("Invalid range argument `{argument}`: {message}")]
    InvalidRange {
        argument: &'static str,
        message: String,
        ctx: ErrorContext,
    },
    #[error("No default values exist for type `{type_name}`")]
    UnsupportedType {
        type_name: String,
        ctx: ErrorContext,
    },
    #[error("Missing required argument `{argument}`")]
    MissingArgument {
        argument: &'static str,
        ctx: ErrorContext,
    },
    #[error("Member data source `{member}` failed: {message}")]
    MemberData {
        member: String,
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<BoxedSource>,
    },
    #[error("Plan error: {message}")]
    Plan {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<BoxedSource>,
    },
    #[error("Failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CombinatorialError {
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        CombinatorialError::UnsupportedType {
            type_name: type_name.into(),
            ctx: ErrorContext::with_help(
                "declare explicit values, a range, random data or a member data source for this parameter",
            ),
        }
    }

    pub fn missing_argument(argument: &'static str) -> Self {
        CombinatorialError::MissingArgument {
            argument,
            ctx: ErrorContext::none(),
        }
    }

    pub fn member_data(member: impl Into<String>, message: impl Into<String>) -> Self {
        CombinatorialError::MemberData {
            member: member.into(),
            message: message.into(),
            ctx: ErrorContext::none(),
            source: None,
        }
    }

    /// Attaches (or replaces) the help message shown under the diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        if let Some(ctx) = self.ctx_mut() {
            ctx.help = Some(help.into());
        }
        self
    }

    /// Appends `note` to the help message, keeping any help already present.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        if let Some(ctx) = self.ctx_mut() {
            ctx.help = Some(match ctx.help.take() {
                Some(help) => format!("{help} ({note})"),
                None => note,
            });
        }
        self
    }

    /// Attaches an underlying cause to variants that carry one.
    pub fn with_source(mut self, cause: impl Into<BoxedSource>) -> Self {
        match &mut self {
            CombinatorialError::MemberData { source, .. } | CombinatorialError::Plan { source, .. } => {
                *source = Some(cause.into());
            }
            _ => {}
        }
        self
    }

    /// Name of the argument at fault, for `InvalidRange` and `MissingArgument` errors.
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            CombinatorialError::InvalidRange { argument, .. }
            | CombinatorialError::MissingArgument { argument, .. } => Some(*argument),
            _ => None,
        }
    }

    fn get_ctx(&self) -> Option<&ErrorContext> {
        match self {
            CombinatorialError::InvalidRange { ctx, .. } => Some(ctx),
            CombinatorialError::UnsupportedType { ctx, .. } => Some(ctx),
            CombinatorialError::MissingArgument { ctx, .. } => Some(ctx),
            CombinatorialError::MemberData { ctx, .. } => Some(ctx),
            CombinatorialError::Plan { ctx, .. } => Some(ctx),
            CombinatorialError::Io { .. } => None,
        }
    }

    fn ctx_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            CombinatorialError::InvalidRange { ctx, .. } => Some(ctx),
            CombinatorialError::UnsupportedType { ctx, .. } => Some(ctx),
            CombinatorialError::MissingArgument { ctx, .. } => Some(ctx),
            CombinatorialError::MemberData { ctx, .. } => Some(ctx),
            CombinatorialError::Plan { ctx, .. } => Some(ctx),
            CombinatorialError::Io { .. } => None,
        }
    }

    /// Returns the type-safe error classification for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            CombinatorialError::InvalidRange { .. } => ErrorType::InvalidRange,
            CombinatorialError::UnsupportedType { .. } => ErrorType::UnsupportedType,
            CombinatorialError::MissingArgument { .. } => ErrorType::MissingArgument,
            CombinatorialError::MemberData { .. } => ErrorType::MemberData,
            CombinatorialError::Plan { .. } => ErrorType::Plan,
            CombinatorialError::Io { .. } => ErrorType::Io,
        }
    }
}

impl Diagnostic for CombinatorialError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.error_type() {
            ErrorType::InvalidRange => "combinatorial::invalid_range",
            ErrorType::UnsupportedType => "combinatorial::unsupported_type",
            ErrorType::MissingArgument => "combinatorial::missing_argument",
            ErrorType::MemberData => "combinatorial::member_data",
            ErrorType::Plan => "combinatorial::plan",
            ErrorType::Io => "combinatorial::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()
            .and_then(|ctx| ctx.help.as_ref())
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

/// Constructs an `InvalidRange` error naming the offending argument.
#[macro_export]
macro_rules! range_err {
    ($argument:expr, $($fmt:tt)+) => {
        $crate::CombinatorialError::InvalidRange {
            argument: $argument,
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::none(),
        }
    };
}

/// Constructs a `Plan` error with a formatted message and no cause.
#[macro_export]
macro_rules! plan_err {
    ($($fmt:tt)+) => {
        $crate::CombinatorialError::Plan {
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
}
