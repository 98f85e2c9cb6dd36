//! Error types for the theory model.
//!
//! Every failure here is a domain validation failure: the model has no I/O, so
//! nothing is transient. Messages carry the offending input so callers can build
//! their own user-facing text.

use crate::types::mode::ModeName;
use thiserror::Error;

/// Errors produced while deriving notes, keys, chords and voicings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("there is no key in mode {mode} with tonic {tonic}")]
    InvalidTonicForMode { tonic: String, mode: ModeName },

    #[error("invalid key signature for notes [{notes}]: {reason}")]
    InvalidKeySignature { notes: String, reason: String },

    #[error("cannot spell {context}")]
    UnresolvableSpelling { context: String },

    #[error("slash degree {slash} is not part of chord degrees [{degrees}]")]
    UnresolvableSlashDegree { slash: String, degrees: String },

    #[error("malformed note '{0}'")]
    MalformedNote(String),

    #[error("malformed {kind} '{input}'")]
    MalformedIdentifier { kind: &'static str, input: String },

    #[error("'{0}' is not a valid natural note")]
    InvalidNaturalNote(String),

    #[error("no interval matches '{0}'")]
    NoMatchingInterval(String),

    #[error("invalid voicing options: {0}")]
    InvalidVoicingOptions(String),
}

impl TheoryError {
    pub(crate) fn malformed(kind: &'static str, input: impl Into<String>) -> Self {
        TheoryError::MalformedIdentifier {
            kind,
            input: input.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TheoryError>;
