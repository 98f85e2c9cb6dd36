// modal-core/src/types/mod.rs

pub mod chord;
pub mod degree;
pub mod interval;
pub mod key;
pub mod mode;
pub mod note;
pub mod voicing;

pub use chord::{build_chord, parse_chord, Chord, ChordBase, ChordExtension, ChordSpec};
pub use degree::{Alteration, ChordDegree, ModeDegree};
pub use interval::{lookup_interval, Interval, IntervalIdentifier, INTERVALS};
pub use key::{build_key, valid_tonics, DiatonicChord, Key, KeySignature};
pub use mode::{mode_data, Mode, ModeName, MODES};
pub use note::{Accidental, NaturalNote, Note, Tone, TONES};
pub use voicing::{generate_voicings, ChordVoicing, VoicedNote, VoicingOptions};
