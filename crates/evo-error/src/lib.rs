//! Error types shared by every `evo-*` crate.
//!
//! The genetic algorithm and self-organizing-map cores both need a small,
//! flat set of error kinds that indicate caller misuse rather than a
//! recoverable runtime condition. This crate defines a single [`Error`] enum
//! and a [`Result`] alias used throughout the workspace.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

/// A `'static`-or-owned error message, cheap to construct from either a
/// string literal or a formatted `String`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The error kinds raised by the GA and SOM cores. Every variant corresponds
/// to caller misuse: none of them are recovered internally.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A chromosome index, probability, or dimension fell outside its
    /// declared bound.
    ArgumentOutOfRange { message: ErrString },
    /// Two parents being crossed had a different chromosome count, or the
    /// same-named chromosomes had differing lengths.
    ShapeMismatch { message: ErrString },
    /// A DNA name was added twice (case-insensitively).
    DuplicateName { message: ErrString },
    /// An operation was attempted without the strategy it needs wired up, or
    /// with a value that violates some structural precondition.
    InvalidConfiguration { message: ErrString },
    /// An entity, population, or host was used after being released.
    Disposed { message: ErrString },
    /// A topology neighbor key did not resolve to a node in the lattice map.
    UnresolvedNeighbor { message: ErrString },
    /// The cancellation token tripped mid-generation.
    Cancelled,
}

impl Error {
    pub fn out_of_range(message: impl Into<ErrString>) -> Self {
        Error::ArgumentOutOfRange {
            message: message.into(),
        }
    }

    pub fn shape_mismatch(message: impl Into<ErrString>) -> Self {
        Error::ShapeMismatch {
            message: message.into(),
        }
    }

    pub fn duplicate_name(message: impl Into<ErrString>) -> Self {
        Error::DuplicateName {
            message: message.into(),
        }
    }

    pub fn invalid_configuration(message: impl Into<ErrString>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn disposed(message: impl Into<ErrString>) -> Self {
        Error::Disposed {
            message: message.into(),
        }
    }

    pub fn unresolved_neighbor(message: impl Into<ErrString>) -> Self {
        Error::UnresolvedNeighbor {
            message: message.into(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::ArgumentOutOfRange { message } => write!(f, "argument out of range: {message}"),
            Error::ShapeMismatch { message } => write!(f, "shape mismatch: {message}"),
            Error::DuplicateName { message } => write!(f, "duplicate name: {message}"),
            Error::InvalidConfiguration { message } => {
                write!(f, "invalid configuration: {message}")
            }
            Error::Disposed { message } => write!(f, "disposed: {message}"),
            Error::UnresolvedNeighbor { message } => write!(f, "unresolved neighbor: {message}"),
            Error::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience macro mirroring the teacher's `radiate_err!` helper: builds an
/// [`Error`] from a variant name and a `format!`-style message.
#[macro_export]
macro_rules! evo_err {
    ($variant:ident: $($arg:tt)*) => {
        $crate::Error::$variant { message: format!($($arg)*).into() }
    };
}
