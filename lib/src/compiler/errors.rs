use thiserror::Error;

/// An error occurred while compiling patterns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// A pattern failed to parse.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to parse.
        #[source]
        source: relex_parser::Error,
    },

    /// The combined patterns need more automaton states than the budget
    /// allows.
    #[error(transparent)]
    TooComplex(#[from] crate::fsa::Error),
}
