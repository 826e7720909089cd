//! Error types for color-space parsing.

use core::fmt;
use tinct_syntax::FetchError;

/// The result type of color-space parsing operations.
pub type Result<T> = core::result::Result<T, Error>;

/// The main error type for color-space parsing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A malformed color-space descriptor.
    Format(FormatError),
    /// The descriptor refers to data that has not been loaded yet.
    ///
    /// Unlike every other error this one must propagate unchanged, so the
    /// document layer can load the missing range and retry.
    MissingData,
}

/// Errors related to the shape of a color-space descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A calibrated or Lab space without the required WhitePoint entry.
    MissingWhitePoint,
    /// A WhitePoint with a Y component other than 1, or a negative X or Z
    /// component.
    InvalidWhitePoint,
    /// A color-space name that is neither built in nor present in the
    /// resource dictionary.
    UnrecognizedName,
    /// A color-space array whose first element is not a recognized family.
    UnrecognizedMode,
    /// A color-space object of an unexpected kind.
    UnrecognizedObject,
    /// A descriptor array operand that is missing or has the wrong type.
    InvalidOperand,
    /// An Indexed lookup table that is neither a stream nor a string.
    InvalidLookup,
    /// An operand reference that does not resolve to an object.
    UnresolvedReference,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "{e}"),
            Self::MissingData => write!(f, "object data has not been loaded yet"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWhitePoint => write!(f, "WhitePoint missing"),
            Self::InvalidWhitePoint => write!(f, "invalid WhitePoint components"),
            Self::UnrecognizedName => write!(f, "unrecognized color-space name"),
            Self::UnrecognizedMode => write!(f, "unrecognized color-space family"),
            Self::UnrecognizedObject => write!(f, "unrecognized color-space object"),
            Self::InvalidOperand => write!(f, "color-space operand is missing or malformed"),
            Self::InvalidLookup => write!(f, "unrecognized Indexed lookup table"),
            Self::UnresolvedReference => write!(f, "reference does not resolve to an object"),
        }
    }
}

impl core::error::Error for Error {}
impl core::error::Error for FormatError {}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::MissingData => Self::MissingData,
            FetchError::MissingEntry => Self::Format(FormatError::UnresolvedReference),
        }
    }
}
