//! # Modal Core
//!
//! Western music theory as plain data and pure functions: spelled notes and the
//! twelve tones they land on, intervals, the seven diatonic modes, keys, chords
//! and chord voicings. Nothing here performs I/O and every lookup table is
//! immutable, so all of it can be shared freely across threads.
//!
//! ## Features
//!
//! - **colored**: Colorized `Display` for keys and chords (default)
//! - **serde**: Serialization for every public value type. Spelled tokens such
//!   as notes and degrees serialize as their string form.
//!
//! ## Example
//!
//! ```
//! use modal_core::types::{build_chord, build_key, ChordBase, ChordSpec};
//!
//! let key = build_key("D", "Dorian")?;
//! assert_eq!(key.signature().to_string(), "");
//!
//! let chord = build_chord("G".parse()?, &ChordSpec::new(ChordBase::Minor))?;
//! assert_eq!(chord.name(), "Gmin");
//! # Ok::<(), modal_core::TheoryError>(())
//! ```

/// Serialize a type through its `Display` impl and deserialize it through
/// `FromStr`, so spelled tokens stay readable (and usable as map keys).
macro_rules! string_serde {
    ($ty:ty) => {
        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use string_serde;

pub mod error;
pub mod types;

pub use error::{Result, TheoryError};
pub use types::{Chord, ChordSpec, Interval, Key, ModeName, Note, VoicingOptions};
