//! Gradient parse errors

/// Gradient parsing error.
///
/// Every failure of the parser surfaces as this one type; [`ParseError::index`]
/// gives the character offset into the (trimmed) input when one applies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Missing ( after function name")]
    MissingOpenParen { index: Option<usize> },

    #[error("Unknown gradient function: {name}")]
    UnknownFunction { name: String },

    #[error("Missing closing ) for ( at {index}")]
    MissingCloseParen { index: usize },

    #[error("Unexpected content after gradient at {index}")]
    TrailingContent { index: usize },

    #[error("Gradient requires at least two stops, found {found} segment(s)")]
    TooFewSegments { found: usize },

    #[error("Not enough stops: found {found} valid color stop(s)")]
    TooFewStops { found: usize },

    #[error("Invalid radial/conic token {token:?} in linear-gradient prelude")]
    ForeignVocabulary { token: String },
}

impl ParseError {
    /// Character offset of the failure, when known
    pub fn index(&self) -> Option<usize> {
        match self {
            ParseError::MissingOpenParen { index } => *index,
            ParseError::MissingCloseParen { index } | ParseError::TrailingContent { index } => {
                Some(*index)
            }
            _ => None,
        }
    }
}
