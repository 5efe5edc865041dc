use thiserror::Error;

/// Failure to turn an annotation string into a [`ReasoningEntry`](crate::ReasoningEntry).
///
/// Both variants carry the raw input so callers can report which line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no weight notation found in {input:?}")]
    NoWeightFound { input: String },

    #[error("weight found but rule label is empty in {input:?}")]
    EmptyRule { input: String },
}

/// Discriminant of a [`ParseError`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    NoWeightFound,
    EmptyRule,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoWeightFound => "no_weight_found",
            Self::EmptyRule => "empty_rule",
        }
    }
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::NoWeightFound { .. } => ParseErrorKind::NoWeightFound,
            Self::EmptyRule { .. } => ParseErrorKind::EmptyRule,
        }
    }

    /// The annotation text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::NoWeightFound { input } | Self::EmptyRule { input } => input,
        }
    }
}
