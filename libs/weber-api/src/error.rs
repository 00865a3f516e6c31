/// Why a string failed to parse as a numeric or boolean literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid syntax: {input:?}")]
    Syntax { input: String },
    #[error("value out of range: {input:?}")]
    Range { input: String },
}

impl ParseError {
    pub fn syntax(input: impl Into<String>) -> Self {
        ParseError::Syntax {
            input: input.into(),
        }
    }

    pub fn range(input: impl Into<String>) -> Self {
        ParseError::Range {
            input: input.into(),
        }
    }
}

/// Conversion failure — returned by every decoder.
///
/// Four orthogonal kinds, each carrying enough context to diagnose at a
/// higher level. None is retryable with the same inputs; recovery policy
/// (default substitution, aggregation, surfacing) belongs to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
    /// The destination's kind has no conversion behavior at all
    /// (composite types and other structural gaps).
    #[error("unsupported destination type {dest}")]
    Unsupported { dest: String },

    /// A dynamic destination received a source outside its capability set.
    #[error("unexpected source type {src} for destination {dest}")]
    Unexpected { dest: String, src: String },

    /// Both kinds are individually known but no coercion rule connects them.
    #[error("cannot convert {src} into {dest}")]
    Unconvertible { dest: String, src: String },

    /// A string source failed to parse into the destination's kind.
    #[error("invalid value for {dest} from {src}")]
    Invalid {
        dest: String,
        src: String,
        #[source]
        source: ParseError,
    },
}

impl CoerceError {
    pub fn unsupported(dest: impl Into<String>) -> Self {
        CoerceError::Unsupported { dest: dest.into() }
    }

    pub fn unexpected(dest: impl Into<String>, src: impl Into<String>) -> Self {
        CoerceError::Unexpected {
            dest: dest.into(),
            src: src.into(),
        }
    }

    pub fn unconvertible(dest: impl Into<String>, src: impl Into<String>) -> Self {
        CoerceError::Unconvertible {
            dest: dest.into(),
            src: src.into(),
        }
    }

    pub fn invalid(dest: impl Into<String>, src: impl Into<String>, source: ParseError) -> Self {
        CoerceError::Invalid {
            dest: dest.into(),
            src: src.into(),
            source,
        }
    }
}
