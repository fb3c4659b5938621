// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The single failure kind of the crate.
//!
//! Absent input is never an error: conversions return `Ok(None)` for it.
//! Everything that can actually go wrong (a malformed pattern, text that
//! does not match its pattern, a value chrono cannot represent) is a
//! [`FormatError`].

use chrono::ParseError;

/// Errors raised while compiling patterns, parsing text or projecting an
/// instant onto a representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The pattern uses a letter that has no field meaning.
    #[error("unsupported letter `{letter}` in pattern `{pattern}`")]
    UnsupportedLetter { letter: char, pattern: String },

    /// A quoted literal in the pattern is never closed.
    #[error("unterminated quote in pattern `{pattern}`")]
    UnterminatedQuote { pattern: String },

    /// The text does not match the pattern.
    #[error("text `{text}` does not match pattern `{pattern}`: {source}")]
    Unparsable {
        text: String,
        pattern: String,
        #[source]
        source: ParseError,
    },

    /// The pattern letter renders but cannot be read back (zone names).
    #[error("letter `{letter}` in pattern `{pattern}` cannot be parsed")]
    ParseUnsupported { letter: char, pattern: String },

    /// The locale identifier is not known to chrono's locale tables.
    #[error("unknown locale `{0}`")]
    UnknownLocale(String),

    /// The value falls outside chrono's representable range.
    #[error("{0} is outside the representable range")]
    OutOfRange(String),

    /// Rendering failed (e.g. a field the value cannot supply).
    #[error("cannot render pattern `{pattern}`")]
    Render { pattern: String },
}

impl FormatError {
    pub(crate) fn out_of_range(what: impl std::fmt::Display) -> Self {
        FormatError::OutOfRange(what.to_string())
    }
}
