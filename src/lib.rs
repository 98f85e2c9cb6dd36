//! # Modal
//!
//! An interactive shell over `modal-core`: spell keys in any of the seven
//! modes, build chords and their voicings, and look up intervals.
//!
//! ## Modules
//!
//! - `commands`: The command registry and the theory command handlers.
//! - `repl`: The Read-Eval-Print Loop and one-shot command runner.

pub mod commands;
pub mod repl;

pub use modal_core::{Chord, Key, ModeName, Note, TheoryError};
